use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Address of the QRPO backend.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend started locally with its default bind address.
    #[default]
    Local,
    /// Any other backend base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the backend base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://127.0.0.1:8000".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Picks the first configured base URL: flag, environment variable, config file.
    pub fn resolve(
        flag: Option<&str>,
        env_var: Option<&str>,
        config_url: Option<&str>,
    ) -> Result<Self, String> {
        [flag, env_var, config_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(|value| {
                value
                    .parse::<Environment>()
                    .map_err(|_| format!("Invalid backend URL: {}", value))
            })
            .unwrap_or(Ok(Environment::Local))
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Environment::Custom {
                api_url: s.trim_end_matches('/').to_string(),
            });
        }
        Err(())
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

//! Inputs for each analysis kind.
//!
//! The dashboard has no forms; it runs every analysis on a fixed demo
//! portfolio that the config file and command-line flags can override.

use crate::api::types::{
    AnalysisRequest, ClassicalRequest, FftRequest, QuantumRequest, SimulationQuery, StockRequest,
};
use crate::config::Config;
use crate::consts::cli_consts::defaults;
use crate::view::AnalysisKind;
use std::f64::consts::PI;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInputs {
    pub series: Vec<f64>,
    pub mu: Vec<f64>,
    pub cov: Vec<Vec<f64>>,
    pub lam: f64,
    pub reps: u32,
    pub ticker: String,
    pub period: String,
    pub tickers: Vec<String>,
    pub weights: Vec<f64>,
}

impl Default for AnalysisInputs {
    fn default() -> Self {
        let tickers: Vec<String> = defaults::SIMULATION_TICKERS
            .iter()
            .map(|t| t.to_string())
            .collect();
        Self {
            series: synthetic_series(defaults::SERIES_LENGTH),
            mu: defaults::EXPECTED_RETURNS.to_vec(),
            cov: defaults::COVARIANCE.iter().map(|row| row.to_vec()).collect(),
            lam: defaults::RISK_AVERSION,
            reps: defaults::QAOA_REPS,
            ticker: defaults::TICKER.to_string(),
            period: defaults::PERIOD.to_string(),
            weights: equal_weights(tickers.len()),
            tickers,
        }
    }
}

impl AnalysisInputs {
    pub fn from_config(config: &Config) -> Self {
        let mut inputs = Self::default();
        if let Some(ticker) = &config.ticker {
            inputs.ticker = ticker.clone();
        }
        if let Some(period) = &config.period {
            inputs.period = period.clone();
        }
        if !config.simulation_tickers.is_empty() {
            inputs.weights = equal_weights(config.simulation_tickers.len());
            inputs.tickers = config.simulation_tickers.clone();
        }
        if let Some(lam) = config.risk_aversion {
            inputs.lam = lam;
        }
        if let Some(reps) = config.qaoa_reps {
            inputs.reps = reps;
        }
        inputs
    }

    /// Replaces the FFT series; the backend needs a minimum number of samples.
    pub fn with_series(mut self, series: Vec<f64>) -> Result<Self, String> {
        if series.len() < defaults::MIN_SERIES_LENGTH {
            return Err(format!(
                "Need at least {} samples for FFT features, got {}",
                defaults::MIN_SERIES_LENGTH,
                series.len()
            ));
        }
        self.series = series;
        Ok(self)
    }

    /// Replaces the simulated portfolio. Missing weights default to equal weighting.
    pub fn with_portfolio(
        mut self,
        tickers: Vec<String>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self, String> {
        if tickers.is_empty() {
            return Err("At least one ticker is required".to_string());
        }
        let weights = weights.unwrap_or_else(|| equal_weights(tickers.len()));
        if weights.len() != tickers.len() {
            return Err(format!(
                "Got {} weights for {} tickers",
                weights.len(),
                tickers.len()
            ));
        }
        self.tickers = tickers;
        self.weights = weights;
        Ok(self)
    }

    /// The request for `kind`. Chat requests are built from the chat log instead.
    pub fn request_for(&self, kind: AnalysisKind) -> Option<AnalysisRequest> {
        let request = match kind {
            AnalysisKind::Signals => AnalysisRequest::Signals(FftRequest {
                series: self.series.clone(),
            }),
            AnalysisKind::Classical => AnalysisRequest::Classical(ClassicalRequest {
                mu: self.mu.clone(),
                cov: self.cov.clone(),
                lam: self.lam,
            }),
            AnalysisKind::Quantum => AnalysisRequest::Quantum(QuantumRequest {
                mu: self.mu.clone(),
                cov: self.cov.clone(),
                lam: self.lam,
                reps: self.reps,
            }),
            AnalysisKind::Stock => AnalysisRequest::Stock(StockRequest {
                ticker: self.ticker.clone(),
                period: self.period.clone(),
            }),
            AnalysisKind::Simulation => AnalysisRequest::Simulation(SimulationQuery {
                tickers: self.tickers.clone(),
                weights: self.weights.clone(),
            }),
            AnalysisKind::Chat => return None,
        };
        Some(request)
    }
}

/// A price-like series: two cycles on a slow drift.
pub fn synthetic_series(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            100.0 + 5.0 * (2.0 * PI * t / 16.0).sin() + 2.0 * (2.0 * PI * t / 5.0).sin() + 0.05 * t
        })
        .collect()
}

pub fn equal_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Parses a comma-separated list such as `1.5,2,3` or `AAPL, MSFT`.
pub fn parse_list<T: FromStr>(s: &str) -> Result<Vec<T>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<T>()
                .map_err(|_| format!("Invalid list item: {}", item))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_requests_cover_every_tab_kind() {
        let inputs = AnalysisInputs::default();
        for kind in [
            AnalysisKind::Signals,
            AnalysisKind::Classical,
            AnalysisKind::Quantum,
            AnalysisKind::Stock,
            AnalysisKind::Simulation,
        ] {
            let request = inputs.request_for(kind).unwrap();
            assert_eq!(request.kind(), kind);
        }
        assert!(inputs.request_for(AnalysisKind::Chat).is_none());
        assert_eq!(inputs.cov.len(), inputs.mu.len());
        assert_eq!(inputs.series.len(), defaults::SERIES_LENGTH);
    }

    #[test]
    fn test_config_overrides_defaults() {
        let config = Config {
            ticker: Some("NVDA".to_string()),
            simulation_tickers: vec!["SPY".to_string(), "TLT".to_string()],
            qaoa_reps: Some(3),
            ..Config::default()
        };
        let inputs = AnalysisInputs::from_config(&config);
        assert_eq!(inputs.ticker, "NVDA");
        assert_eq!(inputs.period, defaults::PERIOD);
        assert_eq!(inputs.weights, vec![0.5, 0.5]);
        assert_eq!(inputs.reps, 3);
    }

    #[test]
    fn test_short_series_is_rejected() {
        let result = AnalysisInputs::default().with_series(vec![1.0; 4]);
        assert!(result.is_err());
        let inputs = AnalysisInputs::default().with_series(vec![1.0; 8]).unwrap();
        assert_eq!(inputs.series.len(), 8);
    }

    #[test]
    fn test_portfolio_weights_must_match_tickers() {
        let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];
        assert!(
            AnalysisInputs::default()
                .with_portfolio(tickers.clone(), Some(vec![1.0]))
                .is_err()
        );
        let inputs = AnalysisInputs::default()
            .with_portfolio(tickers, None)
            .unwrap();
        assert_eq!(inputs.weights, vec![0.5, 0.5]);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list::<f64>("1, 2.5,3"), Ok(vec![1.0, 2.5, 3.0]));
        assert_eq!(
            parse_list::<String>("AAPL,MSFT,"),
            Ok(vec!["AAPL".to_string(), "MSFT".to_string()])
        );
        assert!(parse_list::<f64>("1,x").is_err());
    }
}

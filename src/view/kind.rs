//! Analysis kinds and the operation families that share a loading flag.

use std::str::FromStr;

/// The category of backend analysis a request belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisKind {
    /// FFT band-energy features of a price series.
    Signals,
    /// Mean-variance weights from the classical optimizer.
    Classical,
    /// Binary asset selection from the QAOA optimizer.
    Quantum,
    /// Regression-based stock prediction.
    Stock,
    /// Historical portfolio simulation.
    Simulation,
    /// Chat completion. Replies go to the chat log, never to a tab.
    Chat,
}

/// Kinds that share one loading indicator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum OperationFamily {
    Signal,
    Optimization,
    Market,
    Chat,
}

impl AnalysisKind {
    /// The tab and result-slot key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            AnalysisKind::Signals => "signals",
            AnalysisKind::Classical => "classical",
            AnalysisKind::Quantum => "quantum",
            AnalysisKind::Stock => "stock",
            AnalysisKind::Simulation => "simulation",
            AnalysisKind::Chat => "chat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::Signals => "Signal Analysis",
            AnalysisKind::Classical => "Classical Allocation",
            AnalysisKind::Quantum => "Quantum Allocation",
            AnalysisKind::Stock => "Stock Prediction",
            AnalysisKind::Simulation => "Portfolio Simulation",
            AnalysisKind::Chat => "Assistant",
        }
    }

    pub fn family(&self) -> OperationFamily {
        match self {
            AnalysisKind::Signals => OperationFamily::Signal,
            AnalysisKind::Classical | AnalysisKind::Quantum => OperationFamily::Optimization,
            AnalysisKind::Stock | AnalysisKind::Simulation => OperationFamily::Market,
            AnalysisKind::Chat => OperationFamily::Chat,
        }
    }

    /// Whether a successful result is shown in its own tab.
    pub fn opens_tab(&self) -> bool {
        !matches!(self, AnalysisKind::Chat)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}

impl FromStr for AnalysisKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "signals" | "signal" | "fft" => Ok(AnalysisKind::Signals),
            "classical" => Ok(AnalysisKind::Classical),
            "quantum" => Ok(AnalysisKind::Quantum),
            "stock" => Ok(AnalysisKind::Stock),
            "simulation" | "simulate" => Ok(AnalysisKind::Simulation),
            "chat" => Ok(AnalysisKind::Chat),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_key_round_trips_through_from_key() {
        for kind in AnalysisKind::iter() {
            assert_eq!(AnalysisKind::from_key(kind.key()), Some(kind));
            assert_eq!(kind.to_string(), kind.key());
        }
        assert_eq!(AnalysisKind::from_key("fft"), Some(AnalysisKind::Signals));
        assert_eq!(AnalysisKind::from_key("bloch"), None);
    }

    #[test]
    fn test_optimizers_share_a_family() {
        assert_eq!(
            AnalysisKind::Classical.family(),
            AnalysisKind::Quantum.family()
        );
        assert_ne!(AnalysisKind::Signals.family(), AnalysisKind::Stock.family());
        assert!(!AnalysisKind::Chat.opens_tab());
    }
}

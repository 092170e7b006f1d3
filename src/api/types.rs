//! Request and response bodies of the QRPO backend.

use crate::view::AnalysisKind;
use crate::view::chat::ChatMessage;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FftRequest {
    pub series: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandEnergy {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FftStats {
    pub n: usize,
    pub total_energy: f64,
    pub band_energy: BandEnergy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FftFeatures {
    #[serde(default)]
    pub freqs: Vec<f64>,
    #[serde(default)]
    pub magnitude: Vec<f64>,
    pub stats: FftStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalRequest {
    pub mu: Vec<f64>,
    pub cov: Vec<Vec<f64>>,
    pub lam: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalAllocation {
    pub weights: Vec<f64>,
    pub objective: f64,
    /// Whether the solver converged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumRequest {
    pub mu: Vec<f64>,
    pub cov: Vec<Vec<f64>>,
    pub lam: f64,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumSelection {
    #[serde(deserialize_with = "deserialize_selection_bits")]
    pub selection_bits: Vec<bool>,
    pub objective: f64,
}

impl QuantumSelection {
    /// Indices of the selected assets.
    pub fn selected(&self) -> Vec<usize> {
        self.selection_bits
            .iter()
            .enumerate()
            .filter_map(|(i, bit)| bit.then_some(i))
            .collect()
    }
}

/// The optimizer reports bits either as booleans or as 0/1 integers.
fn deserialize_selection_bits<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bit {
        Bool(bool),
        Int(i64),
    }

    Vec::<Bit>::deserialize(deserializer)?
        .into_iter()
        .map(|bit| match bit {
            Bit::Bool(b) => Ok(b),
            Bit::Int(0) => Ok(false),
            Bit::Int(1) => Ok(true),
            Bit::Int(n) => Err(D::Error::custom(format!(
                "selection bit must be 0 or 1, got {}",
                n
            ))),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRequest {
    pub ticker: String,
    pub period: String,
}

/// Query of `GET /simulate/portfolio`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationQuery {
    pub tickers: Vec<String>,
    pub weights: Vec<f64>,
}

impl SimulationQuery {
    /// Comma-joined, URL-encoded query string.
    pub fn to_query_string(&self) -> String {
        let tickers = self.tickers.join(",");
        let weights = self
            .weights
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "tickers={}&weights={}",
            urlencoding::encode(&tickers),
            urlencoding::encode(&weights)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// One user-triggered backend call with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Signals(FftRequest),
    Classical(ClassicalRequest),
    Quantum(QuantumRequest),
    Stock(StockRequest),
    Simulation(SimulationQuery),
    Chat(ChatRequest),
}

impl AnalysisRequest {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::Signals(_) => AnalysisKind::Signals,
            AnalysisRequest::Classical(_) => AnalysisKind::Classical,
            AnalysisRequest::Quantum(_) => AnalysisKind::Quantum,
            AnalysisRequest::Stock(_) => AnalysisKind::Stock,
            AnalysisRequest::Simulation(_) => AnalysisKind::Simulation,
            AnalysisRequest::Chat(_) => AnalysisKind::Chat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_bits_accept_integers_and_booleans() {
        let from_ints: QuantumSelection =
            serde_json::from_value(json!({"selection_bits": [1, 0, 1, 0], "objective": -0.02}))
                .unwrap();
        let from_bools: QuantumSelection = serde_json::from_value(
            json!({"selection_bits": [true, false, true, false], "objective": -0.02}),
        )
        .unwrap();
        assert_eq!(from_ints, from_bools);
        assert_eq!(from_ints.selected(), vec![0, 2]);
    }

    #[test]
    fn test_selection_bits_reject_other_integers() {
        let result: Result<QuantumSelection, _> =
            serde_json::from_value(json!({"selection_bits": [2], "objective": 0.0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_simulation_query_is_url_encoded() {
        let query = SimulationQuery {
            tickers: vec!["AAPL".into(), "BRK.B".into()],
            weights: vec![0.5, 0.5],
        };
        assert_eq!(
            query.to_query_string(),
            "tickers=AAPL%2CBRK.B&weights=0.5%2C0.5"
        );
    }

    #[test]
    fn test_classical_allocation_omits_missing_solver_fields() {
        let allocation = ClassicalAllocation {
            weights: vec![0.5, 0.5, 0.0, 0.0],
            objective: 0.08,
            success: None,
            message: None,
        };
        assert_eq!(
            serde_json::to_value(&allocation).unwrap(),
            json!({"weights": [0.5, 0.5, 0.0, 0.0], "objective": 0.08})
        );
    }

    #[test]
    fn test_fft_features_tolerate_stats_only_body() {
        let features: FftFeatures = serde_json::from_value(json!({
            "stats": {"n": 64, "total_energy": 1.5, "band_energy": {"low": 1.0, "mid": 0.25, "high": 0.1}}
        }))
        .unwrap();
        assert_eq!(features.stats.n, 64);
        assert!(features.freqs.is_empty());
    }
}

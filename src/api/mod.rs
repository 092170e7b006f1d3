use crate::api::error::ApiError;
use crate::api::types::{
    AnalysisRequest, ChatReply, ChatRequest, ClassicalAllocation, ClassicalRequest, FftFeatures,
    FftRequest, HealthStatus, QuantumRequest, QuantumSelection, SimulationQuery, StockRequest,
};
use crate::environment::Environment;
use serde_json::Value;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Liveness probe.
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// FFT magnitude spectrum and band energies of a series.
    async fn fft_features(&self, request: &FftRequest) -> Result<FftFeatures, ApiError>;

    /// Long-only mean-variance weights.
    async fn optimize_classical(
        &self,
        request: &ClassicalRequest,
    ) -> Result<ClassicalAllocation, ApiError>;

    /// QAOA asset selection.
    async fn optimize_quantum(&self, request: &QuantumRequest)
    -> Result<QuantumSelection, ApiError>;

    /// Prediction, statistics and plot reference for one ticker.
    async fn analyze_stock(&self, request: &StockRequest) -> Result<Value, ApiError>;

    /// Time series, per-asset metrics and correlation matrix of a weighted portfolio.
    async fn simulate_portfolio(&self, query: &SimulationQuery) -> Result<Value, ApiError>;

    /// One chat turn.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;
}

/// Issues the backend call for `request` and returns the reply as untyped JSON.
pub async fn dispatch(backend: &dyn Backend, request: &AnalysisRequest) -> Result<Value, ApiError> {
    let payload = match request {
        AnalysisRequest::Signals(r) => serde_json::to_value(backend.fft_features(r).await?)?,
        AnalysisRequest::Classical(r) => {
            serde_json::to_value(backend.optimize_classical(r).await?)?
        }
        AnalysisRequest::Quantum(r) => serde_json::to_value(backend.optimize_quantum(r).await?)?,
        AnalysisRequest::Stock(r) => backend.analyze_stock(r).await?,
        AnalysisRequest::Simulation(q) => backend.simulate_portfolio(q).await?,
        AnalysisRequest::Chat(r) => serde_json::to_value(backend.chat(r).await?)?,
    };
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_dispatch_serializes_typed_reply() {
        let mut backend = MockBackend::new();
        backend.expect_optimize_quantum().returning(|_| {
            Ok(QuantumSelection {
                selection_bits: vec![true, false, true],
                objective: -0.04,
            })
        });

        let request = AnalysisRequest::Quantum(QuantumRequest {
            mu: vec![0.1, 0.2, 0.3],
            cov: vec![vec![0.0; 3]; 3],
            lam: 0.5,
            reps: 1,
        });
        let payload = dispatch(&backend, &request).await.unwrap();
        assert_eq!(
            payload,
            json!({"selection_bits": [true, false, true], "objective": -0.04})
        );
    }

    #[tokio::test]
    async fn test_dispatch_passes_errors_through() {
        let mut backend = MockBackend::new();
        backend.expect_analyze_stock().returning(|_| {
            Err(ApiError::Http {
                status: 404,
                message: "Not Found".to_string(),
            })
        });

        let request = AnalysisRequest::Stock(StockRequest {
            ticker: "AAPL".to_string(),
            period: "1y".to_string(),
        });
        let result = dispatch(&backend, &request).await;
        assert!(matches!(result, Err(ApiError::Http { status: 404, .. })));
    }
}

//! QRPO Backend Client
//!
//! A JSON-over-HTTP client for the analysis, optimization and chat endpoints.

use crate::api::Backend;
use crate::api::error::ApiError;
use crate::api::types::{
    ChatReply, ChatRequest, ClassicalAllocation, ClassicalRequest, FftFeatures, FftRequest,
    HealthStatus, QuantumRequest, QuantumSelection, SimulationQuery, StockRequest,
};
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("qrpo-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Parses a success body, surfacing an `error` field as [`ApiError::Application`].
    fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        let body: Value = serde_json::from_slice(bytes)?;
        if let Some(error) = ApiError::from_application_body(&body) {
            return Err(error);
        }
        serde_json::from_value(body).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_body(&response_bytes)
    }

    async fn post_request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_body(&response_bytes)
    }
}

#[async_trait::async_trait]
impl Backend for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_request("health").await
    }

    async fn fft_features(&self, request: &FftRequest) -> Result<FftFeatures, ApiError> {
        self.post_request("features/fft", request).await
    }

    async fn optimize_classical(
        &self,
        request: &ClassicalRequest,
    ) -> Result<ClassicalAllocation, ApiError> {
        self.post_request("optimize/classical", request).await
    }

    async fn optimize_quantum(
        &self,
        request: &QuantumRequest,
    ) -> Result<QuantumSelection, ApiError> {
        self.post_request("optimize/quantum", request).await
    }

    async fn analyze_stock(&self, request: &StockRequest) -> Result<Value, ApiError> {
        self.post_request("stock/analyze", request).await
    }

    async fn simulate_portfolio(&self, query: &SimulationQuery) -> Result<Value, ApiError> {
        let endpoint = format!("simulate/portfolio?{}", query.to_query_string());
        self.get_request(&endpoint).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.post_request("chat", request).await
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live backend to run.
mod live_backend_tests {
    use crate::api::Backend;
    use crate::api::types::{ClassicalRequest, FftRequest};
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should report the backend as healthy.
    async fn test_health() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        match client.health().await {
            Ok(health) => assert_eq!(health.status, "ok"),
            Err(e) => panic!("Health check failed: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should compute FFT features for a short series.
    async fn test_fft_features() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        let series = (0..16).map(|i| (i as f64 * 0.5).sin()).collect();
        match client.fft_features(&FftRequest { series }).await {
            Ok(features) => assert_eq!(features.stats.n, 16),
            Err(e) => panic!("FFT request failed: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should return weights that sum to one.
    async fn test_optimize_classical() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        let request = ClassicalRequest {
            mu: vec![0.1, 0.12],
            cov: vec![vec![0.1, 0.0], vec![0.0, 0.2]],
            lam: 0.5,
        };
        match client.optimize_classical(&request).await {
            Ok(allocation) => {
                let total: f64 = allocation.weights.iter().sum();
                assert!((total - 1.0).abs() < 1e-6);
            }
            Err(e) => panic!("Classical optimization failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::QuantumSelection;

    #[test]
    fn test_build_url_joins_without_double_slashes() {
        let client = ApiClient::new(Environment::Custom {
            api_url: "http://example.test:9000/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("/features/fft"),
            "http://example.test:9000/features/fft"
        );
        assert_eq!(client.build_url("health"), "http://example.test:9000/health");
    }

    #[test]
    fn test_decode_body_surfaces_application_errors() {
        let body = br#"{"error": "qiskit unavailable", "type": "ImportError"}"#;
        let result: Result<QuantumSelection, _> = ApiClient::decode_body(body);
        assert!(matches!(result, Err(ApiError::Application { .. })));
    }

    #[test]
    fn test_decode_body_rejects_wrong_shape() {
        let result: Result<HealthStatus, _> = ApiClient::decode_body(br#"{"state": "ok"}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));

        let health: HealthStatus = ApiClient::decode_body(br#"{"status": "ok"}"#).unwrap();
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    /// Requests against an unreachable backend fail without panicking.
    async fn test_unreachable_backend_returns_error() {
        let client = ApiClient::new(Environment::Custom {
            api_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap();
        let result = client.health().await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}

//! Backend requests run off the UI loop
//!
//! Each user-triggered request gets its own task. The outcome comes back to
//! the UI loop as an [`Event`] carrying the request ticket.

use super::core::EventSender;
use crate::api::types::AnalysisRequest;
use crate::api::{Backend, dispatch};
use crate::error_classifier::ErrorClassifier;
use crate::events::Event;
use crate::logging::LogLevel;
use crate::view::RequestTicket;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Spawns backend requests and reports their outcomes as events.
#[derive(Clone)]
pub struct RequestWorker {
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl RequestWorker {
    pub fn new(backend: Arc<dyn Backend>, event_sender: EventSender) -> Self {
        Self {
            backend,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Issues the request for `ticket` on a new task.
    pub fn spawn_analysis(&self, ticket: RequestTicket, request: AnalysisRequest) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            worker
                .event_sender
                .send_event(Event::request_started(ticket))
                .await;

            let event = match dispatch(worker.backend.as_ref(), &request).await {
                Ok(payload) => Event::request_completed(ticket, Ok(payload), LogLevel::Info),
                Err(e) => {
                    let log_level = worker.classifier.classify_request_error(&e);
                    let message = match worker.classifier.hint(&e) {
                        Some(hint) => format!("{} ({})", e, hint),
                        None => e.to_string(),
                    };
                    log::warn!("{} request #{} failed: {}", ticket.kind, ticket.generation, e);
                    Event::request_completed(ticket, Err(message), log_level)
                }
            };
            worker.event_sender.send_event(event).await;
        })
    }

    /// Probes the backend health endpoint on a new task.
    pub fn spawn_health_check(&self) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            let status = match worker.backend.health().await {
                Ok(health) => Ok(health.status),
                Err(e) => Err(match worker.classifier.hint(&e) {
                    Some(hint) => format!("{} ({})", e, hint),
                    None => e.to_string(),
                }),
            };
            worker.event_sender.send_event(Event::health(status)).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBackend;
    use crate::api::error::ApiError;
    use crate::api::types::{FftRequest, HealthStatus};
    use crate::events::{EventPayload, EventType};
    use crate::view::AnalysisKind;
    use tokio::sync::mpsc;

    fn ticket() -> RequestTicket {
        RequestTicket {
            kind: AnalysisKind::Signals,
            generation: 1,
        }
    }

    #[tokio::test]
    async fn test_failed_request_reports_error_event() {
        let mut backend = MockBackend::new();
        backend.expect_fft_features().returning(|_| {
            Err(ApiError::Http {
                status: 500,
                message: "Need at least 8 samples for FFT features.".to_string(),
            })
        });

        let (sender, mut receiver) = mpsc::channel(8);
        let worker = RequestWorker::new(Arc::new(backend), EventSender::new(sender));
        let request = AnalysisRequest::Signals(FftRequest { series: vec![1.0] });
        worker.spawn_analysis(ticket(), request).await.unwrap();

        let started = receiver.recv().await.unwrap();
        assert_eq!(started.event_type, EventType::Refresh);

        let completed = receiver.recv().await.unwrap();
        assert_eq!(completed.event_type, EventType::Error);
        assert_eq!(completed.log_level, LogLevel::Warn);
        match completed.payload {
            Some(EventPayload::Completed {
                ticket: t,
                outcome: Err(message),
            }) => {
                assert_eq!(t, ticket());
                assert!(message.contains("Need at least 8 samples"));
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_status() {
        let mut backend = MockBackend::new();
        backend.expect_health().returning(|| {
            Ok(HealthStatus {
                status: "ok".to_string(),
            })
        });

        let (sender, mut receiver) = mpsc::channel(8);
        let worker = RequestWorker::new(Arc::new(backend), EventSender::new(sender));
        worker.spawn_health_check().await.unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.payload, Some(EventPayload::Health(Ok("ok".to_string()))));
    }
}

//! Event System
//!
//! Types and implementations for request worker events and logging

use crate::logging::{LogLevel, should_log_with_env};
use crate::view::{AnalysisKind, Outcome, RequestTicket};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker running one analysis request.
    Analysis(AnalysisKind),
    /// Worker probing the backend health endpoint.
    HealthCheck,
    /// The dashboard itself (configuration, key handling).
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

/// Data the UI loop applies to the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// A request finished.
    Completed {
        ticket: RequestTicket,
        outcome: Outcome,
    },
    /// A health check finished.
    Health(Result<String, String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    pub payload: Option<EventPayload>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload: None,
        }
    }

    pub fn request_started(ticket: RequestTicket) -> Self {
        Self::new(
            Worker::Analysis(ticket.kind),
            format!("Requesting {} (#{})", ticket.kind.label(), ticket.generation),
            EventType::Refresh,
            LogLevel::Info,
        )
    }

    pub fn request_completed(ticket: RequestTicket, outcome: Outcome, log_level: LogLevel) -> Self {
        let (msg, event_type, log_level) = match &outcome {
            Ok(_) => (
                format!("{} ready (#{})", ticket.kind.label(), ticket.generation),
                EventType::Success,
                LogLevel::Info,
            ),
            Err(message) => (
                format!("{} failed: {}", ticket.kind.label(), message),
                EventType::Error,
                log_level,
            ),
        };
        let mut event = Self::new(Worker::Analysis(ticket.kind), msg, event_type, log_level);
        event.payload = Some(EventPayload::Completed { ticket, outcome });
        event
    }

    pub fn health(status: Result<String, String>) -> Self {
        let (msg, event_type, log_level) = match &status {
            Ok(s) => (
                format!("Backend health: {}", s),
                EventType::Success,
                LogLevel::Info,
            ),
            Err(e) => (
                format!("Backend unreachable: {}", e),
                EventType::Error,
                LogLevel::Warn,
            ),
        };
        let mut event = Self::new(Worker::HealthCheck, msg, event_type, log_level);
        event.payload = Some(EventPayload::Health(status));
        event
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Dashboard, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        // StateChange events are bookkeeping only
        if self.event_type == EventType::StateChange {
            return false;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket() -> RequestTicket {
        RequestTicket {
            kind: AnalysisKind::Quantum,
            generation: 3,
        }
    }

    #[test]
    fn test_completed_event_carries_outcome() {
        let event = Event::request_completed(ticket(), Ok(json!({"objective": 1.0})), LogLevel::Warn);
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.log_level, LogLevel::Info);
        assert_eq!(event.worker, Worker::Analysis(AnalysisKind::Quantum));
        assert!(matches!(
            event.payload,
            Some(EventPayload::Completed { ticket: t, .. }) if t.generation == 3
        ));
    }

    #[test]
    fn test_failed_event_uses_given_level() {
        let event = Event::request_completed(ticket(), Err("timeout".into()), LogLevel::Warn);
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert!(event.msg.contains("Quantum Allocation failed: timeout"));
        assert!(event.to_string().starts_with("Error ["));
    }

    #[test]
    fn test_info_events_are_displayed() {
        assert!(Event::request_started(ticket()).should_display());
        assert!(Event::health(Ok("ok".into())).should_display());
    }
}

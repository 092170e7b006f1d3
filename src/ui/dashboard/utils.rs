//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::view::{AnalysisKind, OperationFamily};
use ratatui::prelude::Color;
use std::time::Duration;

/// Accent color of an operation family.
pub fn family_color(family: OperationFamily) -> Color {
    match family {
        OperationFamily::Signal => Color::Cyan,
        OperationFamily::Optimization => Color::LightMagenta,
        OperationFamily::Market => Color::LightGreen,
        OperationFamily::Chat => Color::LightBlue,
    }
}

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Analysis(kind) => family_color(kind.family()),
        Worker::HealthCheck => Color::Yellow,
        Worker::Dashboard => Color::Gray,
    }
}

/// Spinner frame for the given animation tick.
pub fn spinner(tick: usize) -> &'static str {
    const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
    FRAMES[tick % FRAMES.len()]
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}.{}s", secs, elapsed.subsec_millis() / 100)
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract MM-DD HH:MM from "YYYY-MM-DD HH:MM:SS"
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    let Some(start) = msg.find("error sending request") else {
        return msg.to_string();
    };
    // Keep the "<Kind> failed:" prefix and a trailing hint, drop the URL.
    let prefix = &msg[..start];
    let hint = match msg.rfind(" (") {
        Some(idx) if msg.ends_with(')') && !msg[idx..].starts_with(" (http") => &msg[idx..],
        _ => "",
    };
    format!("{}Network error{}", prefix, hint)
}

/// Short label used in the header's busy line.
pub fn busy_label(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Signals => "FFT",
        AnalysisKind::Classical => "classical",
        AnalysisKind::Quantum => "QAOA",
        AnalysisKind::Stock => "stock",
        AnalysisKind::Simulation => "simulation",
        AnalysisKind::Chat => "assistant",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2025-03-14 09:26:53"), "03-14 09:26");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message(
                "Classical Allocation failed: error sending request for url (http://x) (is the backend running?)"
            ),
            "Classical Allocation failed: Network error (is the backend running?)"
        );
        assert_eq!(
            clean_http_error_message("Stock Prediction failed: error sending request for url (http://x)"),
            "Stock Prediction failed: Network error"
        );
        assert_eq!(clean_http_error_message("HTTP 422"), "HTTP 422");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(2_300)), "2.3s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }
}

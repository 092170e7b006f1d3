//! Dashboard header component
//!
//! Renders the title, backend status and the busy gauge

use super::super::state::DashboardState;
use super::super::utils::{busy_label, format_elapsed, spinner};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and request progress.
pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let (backend_text, title_color) = match &state.view.backend_status {
        Some(Ok(status)) => (format!("backend {}", status), Color::Cyan),
        Some(Err(_)) => ("backend unreachable".to_string(), Color::LightRed),
        None => ("backend unchecked".to_string(), Color::Cyan),
    };
    let title_text = format!(
        "QRPO DASHBOARD v{} | {} ({}) | {} | {}",
        version,
        state.environment,
        state.environment.api_url(),
        backend_text,
        state.response_policy()
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let in_flight = state.view.loading.in_flight();
    let (progress_text, gauge_color, progress_percent) = match in_flight.first() {
        Some(oldest) => {
            // Loops every 20 ticks
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            let names: Vec<&str> = in_flight.iter().map(|r| busy_label(r.kind)).collect();
            (
                format!(
                    "{} RUNNING {} ({})",
                    spinner(state.tick),
                    names.join(", "),
                    format_elapsed(oldest.started_at.elapsed())
                ),
                Color::LightGreen,
                progress,
            )
        }
        None => ("IDLE - select an analysis".to_string(), Color::LightBlue, 100),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

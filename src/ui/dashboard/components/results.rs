//! Result view component
//!
//! Renders the payload behind the active tab. Each kind has its own
//! [`PayloadRenderer`]; payloads that do not decode fall back to pretty JSON.

use super::super::state::DashboardState;
use super::super::utils::{family_color, spinner};
use crate::api::types::{ClassicalAllocation, FftFeatures, QuantumSelection};
use crate::view::{AnalysisKind, ResultSlot};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use serde_json::Value;

const BAR_WIDTH: usize = 30;

/// Turns a result payload into display lines.
pub trait PayloadRenderer {
    fn render(&self, payload: &Value) -> Vec<Line<'static>>;
}

/// Pretty-printed JSON.
pub struct JsonRenderer;

impl PayloadRenderer for JsonRenderer {
    fn render(&self, payload: &Value) -> Vec<Line<'static>> {
        serde_json::to_string_pretty(payload)
            .unwrap_or_else(|_| payload.to_string())
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect()
    }
}

/// Band energies of the FFT features as horizontal bars.
pub struct SignalRenderer;

impl PayloadRenderer for SignalRenderer {
    fn render(&self, payload: &Value) -> Vec<Line<'static>> {
        let Ok(features) = serde_json::from_value::<FftFeatures>(payload.clone()) else {
            return JsonRenderer.render(payload);
        };
        let stats = &features.stats;
        let bands = [
            ("low ", stats.band_energy.low),
            ("mid ", stats.band_energy.mid),
            ("high", stats.band_energy.high),
        ];
        let mut lines = vec![
            Line::from(format!(
                "samples: {}   total energy: {:.4}",
                stats.n, stats.total_energy
            )),
            Line::from(""),
        ];
        for (name, energy) in bands {
            let share = if stats.total_energy > 0.0 {
                energy / stats.total_energy
            } else {
                0.0
            };
            lines.push(bar_line(name, share, format!("{:.4}", energy), Color::Cyan));
        }
        if let Some((peak, _)) = features
            .magnitude
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
        {
            if let Some(freq) = features.freqs.get(peak) {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("dominant frequency: {:.4}", freq)));
            }
        }
        lines
    }
}

/// Portfolio weights of the classical optimizer.
pub struct ClassicalRenderer;

impl PayloadRenderer for ClassicalRenderer {
    fn render(&self, payload: &Value) -> Vec<Line<'static>> {
        let Ok(allocation) = serde_json::from_value::<ClassicalAllocation>(payload.clone()) else {
            return JsonRenderer.render(payload);
        };
        let mut lines = vec![
            Line::from(format!("objective: {:.6}", allocation.objective)),
            Line::from(""),
        ];
        for (i, weight) in allocation.weights.iter().enumerate() {
            lines.push(bar_line(
                &format!("asset {}", i),
                *weight,
                format!("{:.1}%", weight * 100.0),
                Color::LightMagenta,
            ));
        }
        if let Some(message) = allocation.message {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

/// Asset selection of the QAOA optimizer.
pub struct QuantumRenderer;

impl PayloadRenderer for QuantumRenderer {
    fn render(&self, payload: &Value) -> Vec<Line<'static>> {
        let Ok(selection) = serde_json::from_value::<QuantumSelection>(payload.clone()) else {
            return JsonRenderer.render(payload);
        };
        let bits: String = selection
            .selection_bits
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect();
        let selected: Vec<String> = selection
            .selected()
            .iter()
            .map(|i| format!("asset {}", i))
            .collect();
        vec![
            Line::from(format!("objective: {:.6}", selection.objective)),
            Line::from(format!("selection bits: {}", bits)),
            Line::from(format!(
                "selected: {}",
                if selected.is_empty() {
                    "none".to_string()
                } else {
                    selected.join(", ")
                }
            )),
        ]
    }
}

fn bar_line(name: &str, share: f64, value: String, color: Color) -> Line<'static> {
    let filled = (share.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    Line::from(vec![
        Span::raw(format!("{:<8} ", name)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(BAR_WIDTH - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {}", value)),
    ])
}

/// Renderer used for payloads of `kind`.
pub fn renderer_for(kind: AnalysisKind) -> Box<dyn PayloadRenderer> {
    match kind {
        AnalysisKind::Signals => Box::new(SignalRenderer),
        AnalysisKind::Classical => Box::new(ClassicalRenderer),
        AnalysisKind::Quantum => Box::new(QuantumRenderer),
        AnalysisKind::Stock | AnalysisKind::Simulation | AnalysisKind::Chat => {
            Box::new(JsonRenderer)
        }
    }
}

pub fn render_results(f: &mut Frame, area: Rect, state: &DashboardState) {
    let kind = state.view.active_kind();
    let title = kind.map_or("RESULTS".to_string(), |k| k.label().to_uppercase());
    let border_color = kind.map_or(Color::Cyan, |k| family_color(k.family()));

    let mut lines: Vec<Line> = match kind {
        None => vec![Line::from(Span::styled(
            "Run an analysis from the sidebar to open a result tab.",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(kind) => match state.view.results.get(kind) {
            None => vec![Line::from("No result yet.")],
            Some(stored) => {
                let mut lines = vec![Line::from(Span::styled(
                    format!(
                        "request #{} at {}",
                        stored.generation,
                        stored.received_at.format("%H:%M:%S")
                    ),
                    Style::default().fg(Color::DarkGray),
                ))];
                match &stored.slot {
                    ResultSlot::Ready(payload) => lines.extend(renderer_for(kind).render(payload)),
                    ResultSlot::Failed(message) => lines.push(Line::from(Span::styled(
                        format!("Request failed: {}", message),
                        Style::default()
                            .fg(Color::LightRed)
                            .add_modifier(Modifier::BOLD),
                    ))),
                }
                lines
            }
        },
    };
    if let Some(kind) = kind {
        if state.view.loading.is_loading(kind) {
            lines.insert(
                0,
                Line::from(Span::styled(
                    format!("{} refreshing...", spinner(state.tick)),
                    Style::default().fg(Color::LightGreen),
                )),
            );
        }
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

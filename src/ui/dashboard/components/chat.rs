//! Assistant chat panel

use super::super::state::{DashboardState, Focus};
use super::super::utils::spinner;
use crate::view::AnalysisKind;
use crate::view::chat::ChatRole;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

pub fn render_chat(f: &mut Frame, area: Rect, state: &DashboardState) {
    let focused = state.focus == Focus::Chat;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = state
        .view
        .chat
        .messages
        .iter()
        .map(|message| {
            let (who, color) = match message.role {
                ChatRole::User => ("you", Color::White),
                ChatRole::Assistant => ("assistant", Color::LightBlue),
            };
            Line::from(vec![
                Span::styled(
                    format!("{}: ", who),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(message.content.clone()),
            ])
        })
        .collect();
    if state.view.loading.is_loading(AnalysisKind::Chat) {
        lines.push(Line::from(Span::styled(
            format!("assistant is typing {}", spinner(state.tick)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the newest messages in view
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible.max(1));
    let history = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("ASSISTANT")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(history, chunks[0]);

    let cursor = if focused { "█" } else { "" };
    let input = Paragraph::new(format!("{}{}", state.view.chat.input, cursor)).block(
        Block::default()
            .title(if focused { "Message" } else { "[c] to chat" })
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(input, chunks[1]);
}

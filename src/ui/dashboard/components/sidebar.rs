//! Sidebar component
//!
//! Collapsible sections with their actions. The action holding its family's
//! loading flag carries a spinner; failed results are marked.

use super::super::state::{DashboardState, Focus};
use super::super::utils::{family_color, spinner};
use crate::view::sections::{Operation, SidebarRow};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState};

pub fn render_sidebar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = state
        .view
        .sidebar
        .rows()
        .into_iter()
        .map(|row| match row {
            SidebarRow::Header(section) => {
                let marker = if section.expanded { "▼" } else { "▶" };
                ListItem::new(Line::from(Span::styled(
                    format!("{} {}", marker, section.title),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )))
            }
            SidebarRow::Action(action) => {
                let (color, suffix) = match action.operation {
                    Operation::Run(kind) => {
                        let busy = state.view.loading.family(kind.family());
                        let suffix = match busy {
                            Some(in_flight) if in_flight.kind == kind => {
                                format!(" {}", spinner(state.tick))
                            }
                            // Another kind of the same family holds the flag
                            Some(_) => " ·".to_string(),
                            None if state
                                .view
                                .results
                                .slot(kind)
                                .is_some_and(|slot| slot.is_failed()) =>
                            {
                                " ✗".to_string()
                            }
                            None => String::new(),
                        };
                        (family_color(kind.family()), suffix)
                    }
                    Operation::HealthCheck => {
                        let suffix = match &state.view.backend_status {
                            Some(Ok(_)) => " ✓",
                            Some(Err(_)) => " ✗",
                            None => "",
                        };
                        (Color::Yellow, suffix.to_string())
                    }
                };
                ListItem::new(Line::from(vec![
                    Span::raw("   "),
                    Span::styled(action.label, Style::default().fg(color)),
                    Span::styled(suffix, Style::default().fg(Color::LightGreen)),
                ]))
            }
        })
        .collect();

    let border_color = if state.focus == Focus::Sidebar {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title("ANALYSES")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

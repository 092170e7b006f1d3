//! Dashboard footer component
//!
//! Renders the key bindings for the focused pane

use super::super::state::{DashboardState, Focus};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let footer_text = match state.focus {
        Focus::Sidebar => {
            "[↑/↓] Move | [Enter] Run | [Tab/1-9] Tabs | [x] Close | [o] Reopen | [r] Rerun | [d] Clear | [c] Chat | [h] Health | [Q] Quit"
        }
        Focus::Chat => "[Enter] Send | [Esc] Back to sidebar",
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

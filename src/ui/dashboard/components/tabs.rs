//! Tab strip component

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};

pub fn render_tabs(f: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<String> = state
        .view
        .tabs
        .tabs()
        .iter()
        .map(|tab| format!(" {} ", tab.label))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .select(state.view.tabs.active_index());

    f.render_widget(tabs, area);
}

//! Dashboard state management
//!
//! Wraps the view state with the pieces only the terminal UI needs:
//! activity log, sidebar cursor and chat focus.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::params::AnalysisInputs;
use crate::ui::app::UIConfig;
use crate::view::sections::{Operation, SidebarRow};
use crate::view::{ResponsePolicy, ViewState};

use std::collections::VecDeque;
use std::time::Instant;

/// Which pane receives key presses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Chat,
}

/// What the selected sidebar row does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarSelection {
    Section(String),
    Operation(Operation),
}

#[derive(Debug)]
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Tabs, sections, results and loading flags.
    pub view: ViewState,
    /// Parameters sent with each analysis request.
    pub inputs: AnalysisInputs,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Index into the flattened sidebar rows.
    pub cursor: usize,
    pub focus: Focus,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            view: ViewState::new(ui_config.response_policy),
            inputs: ui_config.inputs,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            cursor: 0,
            focus: Focus::Sidebar,
            tick: 0,
        }
    }

    pub fn response_policy(&self) -> ResponsePolicy {
        self.view.policy()
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.view.sidebar.rows().len();
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, rows as isize - 1);
        self.cursor = next as usize;
    }

    /// The selected sidebar row, if the cursor is on one.
    pub fn selection(&self) -> Option<SidebarSelection> {
        let rows = self.view.sidebar.rows();
        match rows.get(self.cursor)? {
            SidebarRow::Header(section) => Some(SidebarSelection::Section(section.id.to_string())),
            SidebarRow::Action(action) => Some(SidebarSelection::Operation(action.operation)),
        }
    }

    /// Keeps the cursor on a valid row after sections collapse.
    pub fn clamp_cursor(&mut self) {
        let rows = self.view.sidebar.rows().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}

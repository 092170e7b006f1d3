//! Dashboard state update logic
//!
//! Applies worker events and key presses to the dashboard state.

use super::state::{DashboardState, Focus, SidebarSelection};

use crate::api::types::AnalysisRequest;
use crate::events::{Event as WorkerEvent, EventPayload, EventType};
use crate::logging::LogLevel;
use crate::view::sections::Operation;
use crate::view::{Action, AnalysisKind, Completion, Effect, RequestTicket};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Side effects the app loop carries out after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    Quit,
    /// Issue `request` under `ticket`.
    Dispatch {
        ticket: RequestTicket,
        request: AnalysisRequest,
    },
    HealthCheck,
}

impl DashboardState {
    /// Advance the animation tick and apply queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    fn process_event(&mut self, event: &WorkerEvent) {
        match &event.payload {
            Some(EventPayload::Completed { ticket, outcome }) => {
                let completion = self.view.complete_analysis(*ticket, outcome.clone());
                if completion == Completion::Discarded {
                    self.add_to_activity_log(WorkerEvent::dashboard_with_level(
                        format!(
                            "Dropped stale {} response (#{})",
                            ticket.kind.label(),
                            ticket.generation
                        ),
                        EventType::StateChange,
                        LogLevel::Debug,
                    ));
                }
            }
            Some(EventPayload::Health(status)) => self.view.record_health(status.clone()),
            None => {}
        }
    }

    /// Translate a key press into state changes plus an optional command.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DashboardCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(DashboardCommand::Quit);
        }
        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key.code),
            Focus::Chat => self.handle_chat_key(key.code),
        }
    }

    fn handle_sidebar_key(&mut self, code: KeyCode) -> Option<DashboardCommand> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(DashboardCommand::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selection(),
            KeyCode::Tab => {
                self.view.apply(Action::NextTab);
                None
            }
            KeyCode::BackTab => {
                self.view.apply(Action::PrevTab);
                None
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let id = self.view.tabs.tabs().get(index)?.id.clone();
                self.view.apply(Action::ActivateTab(id));
                None
            }
            KeyCode::Char('x') => {
                let id = self.view.tabs.active()?.to_string();
                self.view.apply(Action::CloseTab(id));
                None
            }
            KeyCode::Char('o') => {
                // Reopen the tab of the selected action if a result is cached
                if let Some(SidebarSelection::Operation(Operation::Run(kind))) = self.selection() {
                    if kind.opens_tab() && self.view.results.get(kind).is_some() {
                        self.view.apply(Action::OpenTab(kind.key().to_string()));
                    }
                }
                None
            }
            KeyCode::Char('d') => {
                let kind = self.view.active_kind()?;
                self.view.apply(Action::ClearResult(kind));
                None
            }
            KeyCode::Char('r') => {
                let kind = self.view.active_kind()?;
                self.start_analysis(kind)
            }
            KeyCode::Char('h') => Some(DashboardCommand::HealthCheck),
            KeyCode::Char('c') => {
                self.focus = Focus::Chat;
                None
            }
            _ => None,
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) -> Option<DashboardCommand> {
        match code {
            KeyCode::Esc => {
                self.focus = Focus::Sidebar;
                None
            }
            KeyCode::Enter => {
                let request = self.view.submit_chat_input()?;
                let ticket = self.view.begin_analysis(AnalysisKind::Chat);
                Some(DashboardCommand::Dispatch { ticket, request })
            }
            KeyCode::Backspace => {
                self.view.chat.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.view.chat.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn activate_selection(&mut self) -> Option<DashboardCommand> {
        match self.selection()? {
            SidebarSelection::Section(id) => {
                self.view.apply(Action::ToggleSection(id));
                self.clamp_cursor();
                None
            }
            SidebarSelection::Operation(Operation::Run(kind)) => self.start_analysis(kind),
            SidebarSelection::Operation(Operation::HealthCheck) => {
                Some(DashboardCommand::HealthCheck)
            }
        }
    }

    fn start_analysis(&mut self, kind: AnalysisKind) -> Option<DashboardCommand> {
        let request = self.inputs.request_for(kind)?;
        match self.view.apply(Action::BeginAnalysis(kind)) {
            Effect::Dispatch(ticket) => Some(DashboardCommand::Dispatch { ticket, request }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::params::AnalysisInputs;
    use crate::ui::app::UIConfig;
    use crate::view::ResponsePolicy;
    use serde_json::json;
    use std::time::Instant;

    fn state(policy: ResponsePolicy) -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig {
                with_background_color: false,
                response_policy: policy,
                inputs: AnalysisInputs::default(),
            },
        )
    }

    fn press(state: &mut DashboardState, code: KeyCode) -> Option<DashboardCommand> {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_on_action_dispatches_request() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        // Row 1 is "FFT Features" under the expanded signal section.
        press(&mut state, KeyCode::Down);
        let command = press(&mut state, KeyCode::Enter);

        match command {
            Some(DashboardCommand::Dispatch { ticket, request }) => {
                assert_eq!(ticket.kind, AnalysisKind::Signals);
                assert_eq!(request.kind(), AnalysisKind::Signals);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(state.view.loading.is_loading(AnalysisKind::Signals));
    }

    #[test]
    fn test_enter_on_header_toggles_section() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        assert_eq!(press(&mut state, KeyCode::Enter), None);
        assert_eq!(state.view.sidebar.is_expanded("signal"), Some(false));
        assert_eq!(press(&mut state, KeyCode::Enter), None);
        assert_eq!(state.view.sidebar.is_expanded("signal"), Some(true));
    }

    #[test]
    fn test_completed_event_opens_tab() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        let ticket = state.view.begin_analysis(AnalysisKind::Classical);
        let payload = json!({"weights": [0.5, 0.5, 0.0, 0.0], "objective": 0.08});
        state.add_event(WorkerEvent::request_completed(
            ticket,
            Ok(payload.clone()),
            LogLevel::Info,
        ));

        state.update();

        assert_eq!(state.view.tabs.active(), Some("classical"));
        assert_eq!(
            state.view.results.slot(AnalysisKind::Classical).and_then(|s| s.payload()),
            Some(&payload)
        );
        assert!(!state.view.loading.is_loading(AnalysisKind::Classical));
        assert_eq!(state.activity_logs.len(), 1);
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_stale_completion_is_logged_when_discarding() {
        let mut state = state(ResponsePolicy::DiscardStale);
        let first = state.view.begin_analysis(AnalysisKind::Stock);
        let _second = state.view.begin_analysis(AnalysisKind::Stock);
        state.add_event(WorkerEvent::request_completed(
            first,
            Ok(json!({"ticker": "AAPL"})),
            LogLevel::Info,
        ));

        state.update();

        assert!(state.view.results.get(AnalysisKind::Stock).is_none());
        assert!(
            state
                .activity_logs
                .iter()
                .any(|e| e.msg.starts_with("Dropped stale"))
        );
    }

    #[test]
    fn test_health_event_updates_status() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        state.add_event(WorkerEvent::health(Ok("ok".to_string())));
        state.update();
        assert_eq!(state.view.backend_status, Some(Ok("ok".to_string())));
    }

    #[test]
    fn test_chat_focus_collects_input_and_sends() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        press(&mut state, KeyCode::Char('c'));
        assert_eq!(state.focus, Focus::Chat);
        for c in "hi q".chars() {
            assert_eq!(press(&mut state, KeyCode::Char(c)), None);
        }
        press(&mut state, KeyCode::Backspace);

        match press(&mut state, KeyCode::Enter) {
            Some(DashboardCommand::Dispatch { ticket, request }) => {
                assert_eq!(ticket.kind, AnalysisKind::Chat);
                match request {
                    AnalysisRequest::Chat(chat) => {
                        assert_eq!(chat.message, "hi");
                        assert!(chat.conversation_history.is_empty());
                    }
                    other => panic!("unexpected request: {:?}", other),
                }
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(state.view.chat.input.is_empty());

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.focus, Focus::Sidebar);
        assert_eq!(press(&mut state, KeyCode::Char('q')), Some(DashboardCommand::Quit));
    }

    #[test]
    fn test_blank_chat_input_sends_nothing() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        state.focus = Focus::Chat;
        press(&mut state, KeyCode::Char(' '));
        assert_eq!(press(&mut state, KeyCode::Enter), None);
        assert!(!state.view.loading.any());
    }

    #[test]
    fn test_reopen_shows_cached_result() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        let ticket = state.view.begin_analysis(AnalysisKind::Signals);
        state
            .view
            .complete_analysis(ticket, Ok(json!({"stats": {"n": 64}})));
        press(&mut state, KeyCode::Char('x'));
        assert!(state.view.tabs.is_empty());

        // Cursor on "FFT Features"
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char('o'));
        assert_eq!(state.view.tabs.active(), Some("signals"));

        press(&mut state, KeyCode::Char('d'));
        assert!(state.view.results.get(AnalysisKind::Signals).is_none());
    }

    #[test]
    fn test_number_keys_activate_tabs() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        state.view.open_tab("signals");
        state.view.open_tab("classical");
        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.view.tabs.active(), Some("signals"));
        assert_eq!(press(&mut state, KeyCode::Char('9')), None);
        assert_eq!(state.view.tabs.active(), Some("signals"));
    }

    #[test]
    fn test_close_key_closes_active_tab() {
        let mut state = state(ResponsePolicy::LastWriteWins);
        state.view.open_tab("signals");
        state.view.open_tab("stock");
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.view.tabs.ids(), vec!["signals"]);
        assert_eq!(state.view.tabs.active(), Some("signals"));
    }
}

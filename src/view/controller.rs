//! View state controller
//!
//! Owns every piece of dashboard state that user actions and backend
//! completions mutate. All changes go through [`ViewState::apply`] or the
//! operation methods it delegates to.

use super::chat::ChatLog;
use super::kind::AnalysisKind;
use super::results::{LoadingFlags, ResultSlot, ResultStore};
use super::sections::Sidebar;
use super::tabs::TabSet;
use crate::api::types::{AnalysisRequest, ChatRequest};
use crate::api::{Backend, dispatch};
use serde_json::Value;
use std::collections::HashMap;

/// What happens when a response arrives for a request that has since been superseded.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display)]
pub enum ResponsePolicy {
    /// Every completion is applied in arrival order.
    #[default]
    LastWriteWins,
    /// Completions older than the newest request of the same kind are dropped.
    DiscardStale,
}

/// Handle for one in-flight request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: AnalysisKind,
    pub generation: u64,
}

/// Result of a backend call as seen by the controller.
pub type Outcome = Result<Value, String>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Completion {
    Stored,
    Discarded,
}

/// Reducer input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    OpenTab(String),
    CloseTab(String),
    ActivateTab(String),
    NextTab,
    PrevTab,
    ToggleSection(String),
    BeginAnalysis(AnalysisKind),
    CompleteAnalysis {
        ticket: RequestTicket,
        outcome: Outcome,
    },
    ClearResult(AnalysisKind),
}

/// Reducer output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The caller should issue the request identified by the ticket.
    Dispatch(RequestTicket),
    Completed(Completion),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub tabs: TabSet,
    pub sidebar: Sidebar,
    pub results: ResultStore,
    pub loading: LoadingFlags,
    pub chat: ChatLog,
    /// Last health check, `Ok(status)` or the failure message.
    pub backend_status: Option<Result<String, String>>,
    generations: HashMap<AnalysisKind, u64>,
    policy: ResponsePolicy,
}

impl ViewState {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::OpenTab(id) => self.open_tab(&id),
            Action::CloseTab(id) => {
                self.close_tab(&id);
            }
            Action::ActivateTab(id) => {
                self.tabs.activate(&id);
            }
            Action::NextTab => self.tabs.select_next(),
            Action::PrevTab => self.tabs.select_previous(),
            Action::ToggleSection(id) => {
                self.toggle_section(&id);
            }
            Action::BeginAnalysis(kind) => return Effect::Dispatch(self.begin_analysis(kind)),
            Action::CompleteAnalysis { ticket, outcome } => {
                return Effect::Completed(self.complete_analysis(ticket, outcome));
            }
            Action::ClearResult(kind) => {
                self.results.clear(kind);
            }
        }
        Effect::None
    }

    /// Opens and activates the tab `id`. Known kinds get their display label.
    pub fn open_tab(&mut self, id: &str) {
        let label = AnalysisKind::from_key(id).map_or(id, |kind| kind.label());
        self.tabs.open(id, label);
    }

    /// Closes the tab `id`. The result payload behind it is kept.
    pub fn close_tab(&mut self, id: &str) -> bool {
        self.tabs.close(id)
    }

    pub fn toggle_section(&mut self, id: &str) -> Option<bool> {
        self.sidebar.toggle(id)
    }

    /// Marks `kind` as loading and hands out the ticket for its request.
    pub fn begin_analysis(&mut self, kind: AnalysisKind) -> RequestTicket {
        let generation = self.generations.entry(kind).or_insert(0);
        *generation += 1;
        let ticket = RequestTicket {
            kind,
            generation: *generation,
        };
        self.loading.set(kind, ticket.generation);
        ticket
    }

    /// Applies the outcome of the request behind `ticket`.
    pub fn complete_analysis(&mut self, ticket: RequestTicket, outcome: Outcome) -> Completion {
        let kind = ticket.kind;
        // Chat replies append to the conversation, so none of them is stale.
        if self.policy == ResponsePolicy::DiscardStale
            && kind.opens_tab()
            && ticket.generation < self.latest_generation(kind)
        {
            return Completion::Discarded;
        }

        self.loading.clear(kind, ticket.generation);

        if kind == AnalysisKind::Chat {
            match outcome {
                Ok(payload) => {
                    let reply = payload
                        .get("response")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| payload.to_string());
                    self.chat.push_assistant(reply);
                }
                Err(message) => self
                    .chat
                    .push_assistant(format!("Request failed: {}", message)),
            }
            return Completion::Stored;
        }

        match outcome {
            Ok(payload) => {
                self.results
                    .store(kind, ticket.generation, ResultSlot::Ready(payload));
                if kind.opens_tab() {
                    self.open_tab(kind.key());
                }
            }
            Err(message) => {
                self.results
                    .store(kind, ticket.generation, ResultSlot::Failed(message));
            }
        }
        Completion::Stored
    }

    /// Runs one request to completion against `backend`.
    pub async fn run_analysis(
        &mut self,
        backend: &dyn Backend,
        request: AnalysisRequest,
    ) -> Completion {
        let ticket = self.begin_analysis(request.kind());
        let outcome = dispatch(backend, &request)
            .await
            .map_err(|e| e.to_string());
        self.complete_analysis(ticket, outcome)
    }

    /// Moves `message` into the chat log and builds the request carrying the prior history.
    pub fn chat_request(&mut self, message: String) -> AnalysisRequest {
        let (message, conversation_history) = self.chat.push_user(message);
        AnalysisRequest::Chat(ChatRequest {
            message,
            conversation_history,
        })
    }

    /// Sends the chat input line, if it is not blank.
    pub fn submit_chat_input(&mut self) -> Option<AnalysisRequest> {
        let (message, conversation_history) = self.chat.submit_input()?;
        Some(AnalysisRequest::Chat(ChatRequest {
            message,
            conversation_history,
        }))
    }

    pub fn record_health(&mut self, status: Result<String, String>) {
        self.backend_status = Some(status);
    }

    pub fn latest_generation(&self, kind: AnalysisKind) -> u64 {
        self.generations.get(&kind).copied().unwrap_or(0)
    }

    pub fn active_kind(&self) -> Option<AnalysisKind> {
        self.tabs.active().and_then(AnalysisKind::from_key)
    }
}

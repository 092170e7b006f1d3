//! Dashboard view state: tabs, sidebar sections, result slots and loading flags.

pub mod chat;
pub mod controller;
pub mod kind;
pub mod results;
pub mod sections;
pub mod tabs;

pub use controller::{Action, Completion, Effect, Outcome, RequestTicket, ResponsePolicy, ViewState};
pub use kind::{AnalysisKind, OperationFamily};
pub use results::ResultSlot;

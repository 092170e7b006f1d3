//! Headless mode execution
//!
//! Runs a single request through the view controller and prints the
//! activity events followed by the resulting payload.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::cli_messages::print_payload;
use crate::events::{Event, EventPayload};
use crate::params::AnalysisInputs;
use crate::view::chat::ChatRole;
use crate::view::{AnalysisKind, ResponsePolicy, ResultSlot, ViewState};
use crate::{print_cmd_error, print_cmd_success};
use std::error::Error;
use tokio::sync::mpsc;

/// One-shot job of a headless session.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessJob {
    Health,
    Run(AnalysisKind),
    Chat(String),
}

/// Runs `job` to completion, or until Ctrl+C.
pub async fn run_headless_mode(
    mut session: SessionData,
    job: HeadlessJob,
    inputs: AnalysisInputs,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });
    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    let mut view = ViewState::new(ResponsePolicy::default());
    match &job {
        HeadlessJob::Health => {
            session.worker.spawn_health_check();
        }
        HeadlessJob::Run(kind) => {
            let request = inputs
                .request_for(*kind)
                .ok_or_else(|| format!("{} cannot run without input", kind.label()))?;
            let ticket = view.begin_analysis(*kind);
            session.worker.spawn_analysis(ticket, request);
        }
        HeadlessJob::Chat(message) => {
            let request = view.chat_request(message.clone());
            let ticket = view.begin_analysis(AnalysisKind::Chat);
            session.worker.spawn_analysis(ticket, request);
        }
    }

    let finished = tokio::select! {
        finished = drain_until_done(&mut session.event_receiver, &mut view) => finished,
        _ = shutdown_receiver.recv() => false,
    };

    print_session_shutdown();
    if !finished {
        return Err(Box::from("Interrupted before the backend replied"));
    }

    report(&view, &job)?;
    print_session_exit_success();
    Ok(())
}

/// Prints events and applies them until the job's completion arrives.
async fn drain_until_done(receiver: &mut mpsc::Receiver<Event>, view: &mut ViewState) -> bool {
    while let Some(event) = receiver.recv().await {
        if event.should_display() {
            println!("{}", event);
        }
        match event.payload {
            Some(EventPayload::Completed { ticket, outcome }) => {
                view.complete_analysis(ticket, outcome);
                if !view.loading.any() {
                    return true;
                }
            }
            Some(EventPayload::Health(status)) => {
                view.record_health(status);
                return true;
            }
            None => {}
        }
    }
    false
}

fn report(view: &ViewState, job: &HeadlessJob) -> Result<(), Box<dyn Error>> {
    match job {
        HeadlessJob::Health => match &view.backend_status {
            Some(Ok(status)) => {
                print_cmd_success!("Backend reachable", "status: {}", status);
                Ok(())
            }
            Some(Err(message)) => {
                print_cmd_error!("Backend unreachable", message.as_str());
                Err(Box::from(message.clone()))
            }
            None => Err(Box::from("No health status received")),
        },
        HeadlessJob::Run(kind) => match view.results.slot(*kind) {
            Some(ResultSlot::Ready(payload)) => {
                print_payload(payload)?;
                Ok(())
            }
            Some(ResultSlot::Failed(message)) => {
                print_cmd_error!("Request failed", message.as_str());
                Err(Box::from(message.clone()))
            }
            None => Err(Box::from("No result received")),
        },
        HeadlessJob::Chat(_) => {
            let reply = view
                .chat
                .messages
                .last()
                .filter(|m| m.role == ChatRole::Assistant)
                .ok_or("No reply received")?;
            println!("{}", reply.content);
            Ok(())
        }
    }
}

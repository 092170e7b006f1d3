//! Session setup and initialization

use crate::api::{ApiClient, Backend};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::workers::{EventSender, RequestWorker};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for request events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Spawns backend requests
    pub worker: RequestWorker,
    /// Shutdown sender to stop the session
    pub shutdown_sender: broadcast::Sender<()>,
    /// Backend the session talks to
    pub environment: Environment,
}

/// Sets up a session against the backend of `env`
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Builds the HTTP client
/// 2. Creates the event and shutdown channels
/// 3. Wires the request worker to the event channel
pub fn setup_session(env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(env.clone())?;
    log::debug!("Using backend {}", client.environment().api_url());

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);
    let worker = RequestWorker::new(Arc::new(client), EventSender::new(event_sender));

    Ok(SessionData {
        event_receiver,
        worker,
        shutdown_sender,
        environment: env,
    })
}

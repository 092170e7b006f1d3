//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::{INPUT_POLL_MS, SPLASH_DURATION_MS};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::params::AnalysisInputs;
use crate::ui::dashboard::{DashboardCommand, DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::view::ResponsePolicy;
use crate::workers::RequestWorker;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub response_policy: ResponsePolicy,
    pub inputs: AnalysisInputs,
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen with the analyses and their results.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from request tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Broadcasts shutdown signal to the session.
    shutdown_sender: broadcast::Sender<()>,

    /// Issues backend requests off the UI loop.
    worker: RequestWorker,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        worker: RequestWorker,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            shutdown_sender,
            worker,
            ui_config,
        }
    }

    fn show_dashboard(&mut self) {
        let state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
        // Probe the backend once so the header shows its status.
        self.worker.spawn_health_check();
    }

    fn execute(&self, command: DashboardCommand) -> bool {
        match command {
            DashboardCommand::Quit => return false,
            DashboardCommand::Dispatch { ticket, request } => {
                self.worker.spawn_analysis(ticket, request);
            }
            DashboardCommand::HealthCheck => {
                self.worker.spawn_health_check();
            }
        }
        true
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.show_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let command = match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            Some(DashboardCommand::Quit)
                        } else {
                            // Any other key skips the splash screen
                            app.show_dashboard();
                            None
                        }
                    }
                    Screen::Dashboard(state) => state.handle_key(key),
                };

                if let Some(command) = command {
                    if !app.execute(command) {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

use crate::backend::Console;
use crate::board::User;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::sync::{Event as SyncEvent, Handler as SyncEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::StateLogger;
use crate::state::State;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SyncEventSender = std::sync::mpsc::Sender<SyncEvent>;
type SyncEventReceiver = std::sync::mpsc::Receiver<SyncEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> AppResult<()> {
        let (tx, rx) = std::sync::mpsc::channel::<SyncEvent>();

        let operator = User {
            id: "operator".to_string(),
            name: config.operator_name.clone(),
            email: config.operator_email.clone(),
        };
        let theme = crate::ui::Theme::from_name(&config.theme_name).unwrap_or_default();
        let state = Arc::new(Mutex::new(State::new(
            tx.clone(),
            operator,
            theme,
            config.default_board,
        )));

        Self::install_logger(&state)?;
        info!("Starting application...");

        let app = App {
            state,
            config,
        };
        app.start_sync(rx);

        // Request the startup board before the first frame.
        {
            let mut state = app.state.lock().await;
            state.set_loading(true);
            state.dispatch(SyncEvent::LoadBoard {
                kind: app.config.default_board,
            });
        }

        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Install the state-buffer logger feeding the in-app log pane.
    ///
    fn install_logger(state: &Arc<Mutex<State>>) -> AppResult<()> {
        let logger = StateLogger::new();
        let state_for_log = Arc::clone(state);
        logger.set_log_callback(Box::new(move |entry| {
            // The render loop holds the lock briefly; a missed entry under
            // contention is acceptable for the log pane.
            if let Ok(mut state) = state_for_log.try_lock() {
                state.add_log_entry(entry);
            }
        }));
        log::set_boxed_logger(Box::new(logger))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }

    /// Start a separate thread for asynchronous Console API calls.
    ///
    fn start_sync(&self, sync_receiver: SyncEventReceiver) {
        debug!("Creating new thread for asynchronous sync...");
        let cloned_state = Arc::clone(&self.state);
        let console = self
            .config
            .api_base_url
            .as_ref()
            .map(|url| Console::new(url, self.config.access_token.as_deref()));
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let mut sync_event_handler = SyncEventHandler::new(&cloned_state, console);
                    while let Ok(sync_event) = sync_receiver.recv() {
                        match sync_event_handler.handle(sync_event).await {
                            Ok(_) => (),
                            Err(e) => error!("Failed to handle sync event: {}", e),
                        }
                    }
                })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting
    /// the render loop on the main thread. Return the result following an
    /// exit request or unrecoverable error.
    ///
    async fn start_ui(&self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        terminal
            .hide_cursor()
            .map_err(|e| AppError::Terminal(e.to_string()))?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.backend().size() {
                state.set_terminal_size(size);
            };
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state))
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Received application exit request.");
                    break;
                }
                Err(e) => {
                    error!("Failed to handle terminal event: {}", e);
                    break;
                }
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        Ok(())
    }
}

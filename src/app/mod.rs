//! Application module
//!
//! Contains the main application shell: the event loop, key handling, and the
//! worker threads that run catalog fetches and build submissions off the UI
//! thread.
//!
//! # Module Structure
//! - `state` - Application state types (`AppState`, `CatalogSet`, picker)
//! - Main module - `App` struct and event loop

mod state;

// Re-export state types for external use
pub use state::{
    AppState, CatalogMessage, CatalogSet, ConfigureField, FetchRequest, PickerItem, PickerState,
    MAJORS_FETCH_ERROR,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::catalog::CatalogClient;
use crate::dispatch::BuildClient;
use crate::error;
use crate::payload::ImageConfig;
use crate::selection::WizardStep;
use crate::ui::UiRenderer;

/// Main application struct
pub struct App {
    state: Arc<Mutex<AppState>>,
    catalog: CatalogClient,
    builder: BuildClient,
    ui_renderer: UiRenderer,
    /// Channel sender for fetch results (cloned to worker threads)
    catalog_tx: Sender<CatalogMessage>,
    /// Channel receiver for fetch results (drained in the main loop)
    catalog_rx: Receiver<CatalogMessage>,
}

impl App {
    /// Create a new application instance against the given build endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        info!("Creating new App instance");
        let (catalog_tx, catalog_rx) = mpsc::channel();

        Self {
            state: Arc::new(Mutex::new(AppState::default())),
            catalog: CatalogClient::new(),
            builder: BuildClient::new(endpoint),
            ui_renderer: UiRenderer::new(),
            catalog_tx,
            catalog_rx,
        }
    }

    /// Helper function to safely lock the state mutex
    fn lock_state(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, AppState>, Box<dyn std::error::Error>> {
        self.state
            .lock()
            .map_err(|e| error::general_error(format!("Mutex poisoned: {}", e)).into())
    }

    /// Run the main event loop until the user quits.
    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // The majors list is unscoped and fetched once at startup
        self.spawn_majors_fetch();

        loop {
            // Apply any fetch results that arrived since the last frame
            while let Ok(message) = self.catalog_rx.try_recv() {
                self.lock_state()?.apply_catalog_message(message);
            }

            {
                let state = self.lock_state()?;
                terminal.draw(|f| self.ui_renderer.render(f, &state))?;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key)? {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle one key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool, Box<dyn std::error::Error>> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        let mut fetches = Vec::new();
        let mut submit = false;

        {
            let mut state = self.lock_state()?;

            if state.picker.is_some() {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        if let Some(picker) = state.picker.as_mut() {
                            picker.select_previous();
                        }
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if let Some(picker) = state.picker.as_mut() {
                            picker.select_next();
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(action) = state.confirm_picker() {
                            fetches = state.apply_action(action);
                        }
                    }
                    KeyCode::Esc => state.close_picker(),
                    _ => {}
                }
            } else {
                match (state.step, key.code) {
                    (_, KeyCode::Char('q')) => return Ok(true),

                    (WizardStep::Configure, KeyCode::Up) => state.focus_previous(),
                    (WizardStep::Configure, KeyCode::Down | KeyCode::Tab) => state.focus_next(),
                    (WizardStep::Configure, KeyCode::Enter | KeyCode::Char(' ')) => {
                        state.open_picker()
                    }
                    (WizardStep::Configure, KeyCode::Char('n')) => state.advance_step(),

                    (WizardStep::Tools, KeyCode::Up | KeyCode::Down | KeyCode::Tab) => {
                        state.tools_focus = (state.tools_focus + 1) % 2;
                    }
                    (WizardStep::Tools, KeyCode::Enter | KeyCode::Char(' ')) => {
                        state.toggle_focused_tool()
                    }
                    (WizardStep::Tools, KeyCode::Char('n')) => state.advance_step(),
                    (WizardStep::Tools, KeyCode::Char('b') | KeyCode::Esc) => state.retreat_step(),

                    (WizardStep::Summary, KeyCode::Char('b') | KeyCode::Esc) => {
                        state.retreat_step()
                    }
                    (WizardStep::Summary, KeyCode::Enter | KeyCode::Char('g')) => {
                        // Repeated submission is allowed; each request is
                        // independent of any still in flight
                        state.build_in_flight = true;
                        state.build_result = None;
                        submit = true;
                    }

                    _ => {}
                }
            }
        }

        for request in fetches {
            self.spawn_fetch(request);
        }
        if submit {
            self.spawn_build_submission()?;
        }

        Ok(false)
    }

    /// Fetch the Cassandra major lines on a worker thread.
    fn spawn_majors_fetch(&self) {
        let catalog = self.catalog.clone();
        let tx = self.catalog_tx.clone();
        thread::spawn(move || {
            let result = catalog.fetch_cassandra_majors().map_err(|e| e.to_string());
            // Receiver dropped means the app is shutting down
            let _ = tx.send(CatalogMessage::Majors(result));
        });
    }

    /// Start one scoped catalog fetch on a worker thread.
    ///
    /// The request carries the generation it was issued for; the state layer
    /// discards the result if the scope has moved on by the time it arrives.
    fn spawn_fetch(&self, request: FetchRequest) {
        let catalog = self.catalog.clone();
        let tx = self.catalog_tx.clone();
        thread::spawn(move || {
            let message = match request {
                FetchRequest::Minors { major, generation } => CatalogMessage::Minors {
                    generation,
                    result: catalog
                        .fetch_minor_versions(&major)
                        .map_err(|e| e.to_string()),
                },
                FetchRequest::Java { major, generation } => CatalogMessage::Java {
                    generation,
                    result: catalog
                        .fetch_java_versions(&major)
                        .map_err(|e| e.to_string()),
                },
                FetchRequest::Python { generation } => CatalogMessage::Python {
                    generation,
                    result: catalog.fetch_python_versions().map_err(|e| e.to_string()),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Assemble the payload and submit it on a worker thread.
    fn spawn_build_submission(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config = {
            let mut state = self.lock_state()?;
            match ImageConfig::from_selection(&state.selection) {
                Ok(config) => config,
                Err(e) => {
                    // The wizard guard normally prevents this path
                    debug!("build submission rejected: {e}");
                    state.build_in_flight = false;
                    state.status_message = e.to_string();
                    return Ok(());
                }
            }
        };

        let builder = self.builder.clone();
        let tx = self.catalog_tx.clone();
        thread::spawn(move || {
            let response = builder.submit(&config);
            let _ = tx.send(CatalogMessage::Build(response));
        });

        Ok(())
    }
}

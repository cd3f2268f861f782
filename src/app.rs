//! Application state and logic
//!
//! Owns the host list, the editor dialog and the message loop that ties
//! them to storage, persisted state and the terminal.

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::config::{Settings, SharedState};
use crate::editor::{FormOutcome, HostForm};
use crate::event::{AppEvent, EventConfig, EventHandler, Terminal};
use crate::host_list::{Binding, Event, HostList, HostListOptions, Message, Mode, Update};
use crate::ssh::{Executor, SshCommandBuilder};
use crate::storage::SharedStorage;
use crate::ui::{self, theme::Theme};

/// Application state
pub struct App {
    /// Configuration
    pub settings: Settings,

    /// Theme for rendering
    pub theme: Theme,

    /// Host selection state machine
    pub host_list: HostList,

    /// Open host editor, if any
    pub editor: Option<HostForm>,

    /// Whether help is shown
    pub show_help: bool,

    /// Status message
    pub status_message: Option<String>,

    /// Error message
    pub error_message: Option<String>,

    /// Whether app should quit
    pub should_quit: bool,

    /// Toggles the help overlay
    pub help_key: Binding,

    /// Quits the application
    pub quit_key: Binding,

    storage: SharedStorage,
    state: SharedState,
    state_path: PathBuf,
    queue: VecDeque<Message>,
    needs_clear: bool,
}

impl App {
    /// Create a new application
    pub fn new(
        settings: Settings,
        storage: SharedStorage,
        state: SharedState,
        state_path: PathBuf,
        executor: Box<dyn Executor>,
    ) -> Result<Self> {
        let options = HostListOptions::from_settings(&settings).context("Invalid key binding")?;
        let help_key = Binding::parse(&settings.keybindings.help, "help")
            .context("Invalid help key binding")?;
        let quit_key = Binding::parse(&settings.keybindings.quit, "quit")
            .context("Invalid quit key binding")?;

        let host_list = HostList::new(
            storage.clone(),
            state.clone(),
            Box::new(SshCommandBuilder::from_settings(&settings.ssh)),
            executor,
            options,
        );
        let theme = Theme::from_name(&settings.ui.theme);

        Ok(Self {
            settings,
            theme,
            host_list,
            editor: None,
            show_help: false,
            status_message: None,
            error_message: None,
            should_quit: false,
            help_key,
            quit_key,
            storage,
            state,
            state_path,
            queue: VecDeque::new(),
            needs_clear: false,
        })
    }

    /// Size the list for a terminal and load hosts
    pub fn start(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height);
        let init = self.host_list.init();
        self.apply(init);
        self.drain();
    }

    /// Run the application main loop
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new()?;
        let mut events = EventHandler::new(EventConfig {
            tick_rate_ms: self.settings.ui.tick_rate_ms,
        });

        let size = terminal.backend.size()?;
        self.start(size.width, size.height);

        loop {
            if self.take_needs_clear() {
                terminal.backend.clear()?;
            }

            // Draw UI
            terminal.backend.draw(|frame| {
                ui::draw(frame, self);
            })?;

            match events.next()? {
                AppEvent::Key(key) => self.handle_key(key),
                AppEvent::Resize(width, height) => self.handle_resize(width, height),
                AppEvent::Tick => {}
            }

            if self.should_quit {
                break;
            }
        }

        terminal.restore()?;
        Ok(())
    }

    /// Queue a message and process everything it leads to
    pub fn dispatch(&mut self, message: Message) {
        self.queue.push_back(message);
        self.drain();
    }

    fn drain(&mut self) {
        while let Some(message) = self.queue.pop_front() {
            let update = self.host_list.update(message);
            self.apply(update);
        }
    }

    fn apply(&mut self, update: Update) {
        self.queue.extend(update.messages);
        for event in update.events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::HostSelected(id) => {
                self.state.borrow_mut().selected = Some(id);
                self.save_state();
            }
            Event::EditHost(id) => {
                let result = self.storage.borrow().get(id);
                match result {
                    Ok(host) => self.editor = Some(HostForm::edit(&host)),
                    Err(e) => self.error_message = Some(e.to_string()),
                }
            }
            Event::CreateHost => {
                self.editor = Some(HostForm::new());
            }
            Event::Error(e) => {
                warn!("{}", e);
                self.error_message = Some(e.to_string());
            }
            Event::ProcessError(failure) => {
                self.error_message = Some(failure.to_string());
            }
            Event::RefreshCompleted => {
                debug!("Host list refreshed");
            }
            Event::TerminalRestored => {
                self.needs_clear = true;
            }
        }
    }

    fn save_state(&mut self) {
        let result = self.state.borrow().save(&self.state_path);
        if let Err(e) = result {
            error!("Failed to save state: {:#}", e);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Clear messages
        self.error_message = None;
        self.status_message = None;

        if self.editor.is_some() {
            self.handle_editor_key(key);
            return;
        }

        if self.show_help {
            if self.help_key.matches(&key) || key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return;
        }

        let idle =
            !self.host_list.list().is_filtering() && self.host_list.mode() == Mode::Normal;
        if idle && self.quit_key.matches(&key) {
            self.should_quit = true;
            return;
        }
        if idle && self.help_key.matches(&key) {
            self.show_help = true;
            return;
        }

        self.dispatch(Message::Key(key));
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match editor.handle_key(key) {
            FormOutcome::Continue => {}
            FormOutcome::Cancel => {
                self.editor = None;
            }
            FormOutcome::Submit => {
                let host = match editor.to_host() {
                    Ok(host) => host,
                    Err(e) => {
                        self.error_message = Some(e.to_string());
                        return;
                    }
                };

                let title = host.title.clone();
                let result = self.storage.borrow_mut().save(host);
                match result {
                    Ok(id) => {
                        info!("Saved host {} ({})", id, title);
                        self.editor = None;
                        self.state.borrow_mut().selected = Some(id);
                        self.save_state();
                        self.status_message = Some(format!("Saved '{}'", title));
                        self.dispatch(Message::RefreshRepo);
                    }
                    Err(e) => {
                        error!("Failed to save host: {}", e);
                        self.error_message = Some(e.to_string());
                    }
                }
            }
        }
    }

    /// Resize the list to the area left for it
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let area = ui::list_area(Rect::new(0, 0, width, height));
        self.dispatch(Message::Resize {
            width: area.width,
            height: area.height,
        });
    }

    /// Whether the screen must be fully repainted, resetting the flag
    pub fn take_needs_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_clear)
    }
}

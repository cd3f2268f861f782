//! Host list
//!
//! The selection state machine behind the main screen. It routes key input
//! by mode, derives the title line from the selection, launches the connect
//! command and duplicates hosts. It performs no rendering and never touches
//! the terminal except through its [`Executor`].

pub mod error;
pub mod item;
pub mod keymap;
pub mod list;
pub mod message;
pub mod naming;
pub mod process;

use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use crate::config::keys::KeyParseError;
use crate::config::{Settings, SharedState};
use crate::ssh::{CommandBuilder, Executor};
use crate::storage::{HostId, SharedStorage};

pub use error::{ListError, ProcessFailure};
pub use item::ListItem;
pub use keymap::{Binding, KeyMap, ListKeys};
pub use list::{FilterList, FilterState};
pub use message::{Event, Message, Update};

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Waiting for the user to confirm removal of the selected host
    ConfirmRemove,
}

/// Fixed configuration of the host list
#[derive(Debug, Clone)]
pub struct HostListOptions {
    /// Title shown when nothing is selected
    pub placeholder_title: String,
    pub keymap: KeyMap,
    pub list_keys: ListKeys,
}

impl HostListOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self, KeyParseError> {
        Ok(Self {
            placeholder_title: settings.ui.placeholder_title.clone(),
            keymap: KeyMap::from_bindings(&settings.keybindings)?,
            list_keys: ListKeys::from_bindings(&settings.keybindings)?,
        })
    }
}

impl Default for HostListOptions {
    fn default() -> Self {
        Self {
            placeholder_title: "press 'n' to add a new host".to_string(),
            keymap: KeyMap::default(),
            list_keys: ListKeys::default(),
        }
    }
}

pub struct HostList {
    list: FilterList,
    storage: SharedStorage,
    state: SharedState,
    builder: Box<dyn CommandBuilder>,
    executor: Box<dyn Executor>,
    keymap: KeyMap,
    placeholder_title: String,
    mode: Mode,
    title: String,
    last_selected: Option<HostId>,
}

impl HostList {
    pub fn new(
        storage: SharedStorage,
        state: SharedState,
        builder: Box<dyn CommandBuilder>,
        executor: Box<dyn Executor>,
        options: HostListOptions,
    ) -> Self {
        Self {
            list: FilterList::new(options.list_keys),
            storage,
            state,
            builder,
            executor,
            keymap: options.keymap,
            title: options.placeholder_title.clone(),
            placeholder_title: options.placeholder_title,
            mode: Mode::Normal,
            last_selected: None,
        }
    }

    /// First step after construction. Loading is deferred to the returned
    /// message so construction never performs I/O.
    pub fn init(&self) -> Update {
        Update::message(Message::RefreshRepo)
    }

    pub fn update(&mut self, message: Message) -> Update {
        match message {
            Message::RefreshRepo => self.refresh_repo(),
            Message::RefreshUi => self.refresh_ui(),
            Message::Resize { width, height } => {
                self.list.set_size(width, height);
                Update::none()
            }
            Message::Key(key) => self.handle_key(key),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current title line
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn list(&self) -> &FilterList {
        &self.list
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn selected(&self) -> Option<&ListItem> {
        self.list.selected_item()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        if self.list.is_filtering() {
            self.list.handle_key(key);
            return Update::message(Message::RefreshUi);
        }

        match self.mode {
            Mode::ConfirmRemove => {
                self.mode = Mode::Normal;
                if self.keymap.confirm.matches(&key) {
                    self.remove_selected()
                } else {
                    debug!("Removal cancelled");
                    self.update_title();
                    Update::none()
                }
            }
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Update {
        if self.keymap.connect.matches(&key) {
            return self.connect();
        }

        if self.keymap.remove.matches(&key) {
            if self.selected().is_none() {
                return no_selection();
            }
            self.mode = Mode::ConfirmRemove;
            self.update_title();
            return Update::none();
        }

        if self.keymap.edit.matches(&key) {
            return match self.selected() {
                Some(item) => {
                    info!("Editing host {}", item.id());
                    Update::event(Event::EditHost(item.id()))
                }
                None => no_selection(),
            };
        }

        if self.keymap.append.matches(&key) {
            return Update::event(Event::CreateHost);
        }

        if self.keymap.clone.matches(&key) {
            return self.copy_selected();
        }

        self.list.handle_key(key);
        Update::message(Message::RefreshUi)
    }

    fn connect(&mut self) -> Update {
        let Some(item) = self.list.selected_item() else {
            return no_selection();
        };

        let command = self.builder.build(item.host());
        let mut update = Update::event(Event::TerminalRestored);
        if let Err(failure) = process::launch(self.executor.as_mut(), &command) {
            update = update.with_event(Event::ProcessError(failure));
        }

        update.with_message(Message::RefreshUi)
    }

    fn remove_selected(&mut self) -> Update {
        let Some(id) = self.selected().map(ListItem::id) else {
            return no_selection();
        };

        let result = self.storage.borrow_mut().delete(id);
        match result {
            Ok(()) => {
                info!("Removed host {}", id);
                Update::message(Message::RefreshRepo)
            }
            Err(e) => {
                warn!("Failed to remove host {}: {}", id, e);
                Update::event(Event::Error(e.into())).with_message(Message::RefreshUi)
            }
        }
    }

    fn copy_selected(&mut self) -> Update {
        let Some(item) = self.selected() else {
            return no_selection();
        };

        let title = naming::next_copy_title(
            item.title(),
            self.list.items().iter().map(ListItem::title),
        );
        let copy = item.host().duplicate(title);

        let result = self.storage.borrow_mut().save(copy);
        match result {
            Ok(id) => {
                info!("Copied host {} as {}", item.id(), id);
                Update::message(Message::RefreshRepo).with_message(Message::RefreshUi)
            }
            Err(e) => {
                warn!("Failed to copy host {}: {}", item.id(), e);
                Update::event(Event::Error(e.into()))
            }
        }
    }

    fn refresh_repo(&mut self) -> Update {
        let result = self.storage.borrow().get_all();
        let mut hosts = match result {
            Ok(hosts) => hosts,
            Err(e) => {
                warn!("Failed to load hosts: {}", e);
                return Update::event(Event::Error(e.into()));
            }
        };

        // Stable, so equal titles keep storage order
        hosts.sort_by(|a, b| a.title.cmp(&b.title));
        self.list.set_items(hosts.into_iter().map(ListItem::new).collect());

        let selected = self.state.borrow().selected;
        if let Some(id) = selected {
            let position = self.list.visible_items().position(|item| item.id() == id);
            self.list.select(position);
        }

        debug!("Loaded {} hosts", self.list.items().len());
        Update::event(Event::RefreshCompleted).with_message(Message::RefreshUi)
    }

    fn refresh_ui(&mut self) -> Update {
        let mut update = Update::none();

        let current = self.selected().map(ListItem::id);
        if current != self.last_selected {
            self.last_selected = current;
            if let Some(id) = current {
                debug!("Selected host {}", id);
                update = update.with_event(Event::HostSelected(id));
            }
        }

        self.update_title();
        self.keymap.set_should_show_edit_buttons(current.is_some());

        update
    }

    /// Compute the title for the current selection and mode
    pub fn derive_title(&self) -> String {
        let Some(item) = self.selected() else {
            return self.placeholder_title.clone();
        };

        match self.mode {
            Mode::ConfirmRemove => format!(
                "delete \"{}\" ? ({}/N)",
                item.title(),
                self.keymap.confirm.help_key()
            ),
            Mode::Normal => self.builder.build(item.host()).to_string(),
        }
    }

    fn update_title(&mut self) {
        self.title = self.derive_title();
    }
}

fn no_selection() -> Update {
    Update::event(Event::Error(ListError::NoSelection))
}

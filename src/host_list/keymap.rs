//! Key bindings for the host list

use crossterm::event::{KeyCode, KeyEvent};

use crate::config::keys::{parse_keys, KeyParseError, KeySpec};
use crate::config::settings::KeyBindings;

/// A named key binding with its help text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    keys: Vec<KeySpec>,
    help: &'static str,
}

impl Binding {
    pub fn new(keys: Vec<KeySpec>, help: &'static str) -> Self {
        Self { keys, help }
    }

    /// Build a binding from key strings such as `"Ctrl-c"`
    pub fn parse(specs: &[String], help: &'static str) -> Result<Self, KeyParseError> {
        Ok(Self::new(parse_keys(specs)?, help))
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.keys.iter().any(|k| k.matches(key))
    }

    pub fn keys(&self) -> &[KeySpec] {
        &self.keys
    }

    /// Label of the first key, used in hints
    pub fn help_key(&self) -> String {
        self.keys.first().map(|k| k.to_string()).unwrap_or_default()
    }

    pub fn help(&self) -> &'static str {
        self.help
    }
}

/// Host actions
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub connect: Binding,
    pub remove: Binding,
    pub edit: Binding,
    pub append: Binding,
    pub clone: Binding,
    pub confirm: Binding,
    show_edit_buttons: bool,
}

impl KeyMap {
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self, KeyParseError> {
        Ok(Self {
            connect: Binding::parse(&bindings.connect, "connect")?,
            remove: Binding::parse(&bindings.remove, "remove")?,
            edit: Binding::parse(&bindings.edit, "edit")?,
            append: Binding::parse(&bindings.append, "add new")?,
            clone: Binding::parse(&bindings.clone, "clone")?,
            confirm: Binding::parse(&bindings.confirm, "confirm")?,
            show_edit_buttons: false,
        })
    }

    /// Hide host-specific bindings when nothing is selected
    pub fn set_should_show_edit_buttons(&mut self, show: bool) {
        self.show_edit_buttons = show;
    }

    pub fn shows_edit_buttons(&self) -> bool {
        self.show_edit_buttons
    }

    /// Bindings currently worth advertising
    pub fn short_help(&self) -> Vec<&Binding> {
        if self.show_edit_buttons {
            vec![&self.connect, &self.append, &self.clone, &self.edit, &self.remove]
        } else {
            vec![&self.append]
        }
    }

    pub fn full_help(&self) -> Vec<&Binding> {
        vec![
            &self.connect,
            &self.append,
            &self.clone,
            &self.edit,
            &self.remove,
            &self.confirm,
        ]
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        fn plain(c: KeyCode, help: &'static str) -> Binding {
            Binding::new(vec![KeySpec::plain(c)], help)
        }

        Self {
            connect: plain(KeyCode::Enter, "connect"),
            remove: plain(KeyCode::Char('d'), "remove"),
            edit: plain(KeyCode::Char('e'), "edit"),
            append: plain(KeyCode::Char('n'), "add new"),
            clone: plain(KeyCode::Char('c'), "clone"),
            confirm: plain(KeyCode::Char('y'), "confirm"),
            show_edit_buttons: false,
        }
    }
}

/// Navigation bindings of the underlying list
#[derive(Debug, Clone)]
pub struct ListKeys {
    pub up: Binding,
    pub down: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub top: Binding,
    pub bottom: Binding,
    pub filter: Binding,
    pub clear_filter: Binding,
}

impl ListKeys {
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self, KeyParseError> {
        Ok(Self {
            up: Binding::parse(&bindings.up, "up")?,
            down: Binding::parse(&bindings.down, "down")?,
            page_up: Binding::parse(&bindings.page_up, "prev page")?,
            page_down: Binding::parse(&bindings.page_down, "next page")?,
            top: Binding::parse(&bindings.top, "go to start")?,
            bottom: Binding::parse(&bindings.bottom, "go to end")?,
            filter: Binding::parse(&bindings.filter, "filter")?,
            clear_filter: Binding::parse(&bindings.clear_filter, "clear filter")?,
        })
    }

    pub fn all(&self) -> Vec<&Binding> {
        vec![
            &self.up,
            &self.down,
            &self.page_up,
            &self.page_down,
            &self.top,
            &self.bottom,
            &self.filter,
            &self.clear_filter,
        ]
    }
}

impl Default for ListKeys {
    fn default() -> Self {
        // Built-in defaults always parse
        Self::from_bindings(&KeyBindings::default()).unwrap_or_else(|_| Self {
            up: Binding::new(vec![KeySpec::plain(KeyCode::Up)], "up"),
            down: Binding::new(vec![KeySpec::plain(KeyCode::Down)], "down"),
            page_up: Binding::new(vec![KeySpec::plain(KeyCode::PageUp)], "prev page"),
            page_down: Binding::new(vec![KeySpec::plain(KeyCode::PageDown)], "next page"),
            top: Binding::new(vec![KeySpec::plain(KeyCode::Home)], "go to start"),
            bottom: Binding::new(vec![KeySpec::plain(KeyCode::End)], "go to end"),
            filter: Binding::new(vec![KeySpec::plain(KeyCode::Char('/'))], "filter"),
            clear_filter: Binding::new(vec![KeySpec::plain(KeyCode::Esc)], "clear filter"),
        })
    }
}

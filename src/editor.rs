//! Host editor form
//!
//! Text fields for creating or editing a host. The form only collects
//! input; saving is done by the caller.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::storage::{Host, HostId};

/// Validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("title must not be empty")]
    MissingTitle,

    #[error("address must not be empty")]
    MissingAddress,

    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// Editable fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Address,
    User,
    Port,
    IdentityFile,
    Description,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Address,
        Field::User,
        Field::Port,
        Field::IdentityFile,
        Field::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Address => "Address",
            Field::User => "User",
            Field::Port => "Port",
            Field::IdentityFile => "Identity file",
            Field::Description => "Description",
        }
    }
}

/// What the caller should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Continue,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct HostForm {
    id: HostId,
    values: [String; 6],
    focus: usize,
}

impl HostForm {
    /// Empty form for a new host
    pub fn new() -> Self {
        Self {
            id: HostId::NEW,
            values: Default::default(),
            focus: 0,
        }
    }

    /// Form prefilled from an existing host
    pub fn edit(host: &Host) -> Self {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            id: host.id,
            values: [
                host.title.clone(),
                host.address.clone(),
                opt(&host.user),
                host.port.map(|p| p.to_string()).unwrap_or_default(),
                opt(&host.identity_file),
                opt(&host.description),
            ],
            focus: 0,
        }
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    pub fn focus(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[Self::index(field)]
    }

    fn index(field: Field) -> usize {
        Field::ALL.iter().position(|f| *f == field).unwrap_or(0)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return FormOutcome::Continue;
        }

        match key.code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % Field::ALL.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
            }
            KeyCode::Backspace => {
                self.values[self.focus].pop();
            }
            KeyCode::Char(c) => {
                self.values[self.focus].push(c);
            }
            _ => {}
        }

        FormOutcome::Continue
    }

    /// Validate and build the host
    pub fn to_host(&self) -> Result<Host, FormError> {
        let text = |field: Field| self.value(field).trim().to_string();
        let optional = |field: Field| Some(text(field)).filter(|v| !v.is_empty());

        let title = text(Field::Title);
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let address = text(Field::Address);
        if address.is_empty() {
            return Err(FormError::MissingAddress);
        }

        let port = match optional(Field::Port) {
            Some(p) => Some(p.parse::<u16>().map_err(|_| FormError::InvalidPort(p.clone()))?),
            None => None,
        };

        Ok(Host {
            id: self.id,
            title,
            description: optional(Field::Description),
            address,
            user: optional(Field::User),
            port,
            identity_file: optional(Field::IdentityFile),
        })
    }
}

impl Default for HostForm {
    fn default() -> Self {
        Self::new()
    }
}

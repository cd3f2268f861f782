//! Messages consumed and events emitted by the host list

use crossterm::event::KeyEvent;

use super::error::{ListError, ProcessFailure};
use crate::storage::HostId;

/// Input to [`HostList::update`](super::HostList::update)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Reload every host from storage
    RefreshRepo,
    /// Re-derive title, selection and key hints
    RefreshUi,
    /// Raw key input
    Key(KeyEvent),
    /// Terminal size changed
    Resize { width: u16, height: u16 },
}

/// Notification for the surrounding application
#[derive(Debug)]
pub enum Event {
    HostSelected(HostId),
    EditHost(HostId),
    CreateHost,
    Error(ListError),
    ProcessError(ProcessFailure),
    RefreshCompleted,
    /// A child process gave the terminal back; a full redraw is needed
    TerminalRestored,
}

/// Result of a single update step: follow-up messages for the host list
/// and events for the shell, both in emission order.
#[derive(Debug, Default)]
pub struct Update {
    pub messages: Vec<Message>,
    pub events: Vec<Event>,
}

impl Update {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(message: Message) -> Self {
        Self {
            messages: vec![message],
            events: Vec::new(),
        }
    }

    pub fn event(event: Event) -> Self {
        Self {
            messages: Vec::new(),
            events: vec![event],
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }
}

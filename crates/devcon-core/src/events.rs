//! Event seam between the engine and its host
//!
//! The engine never renders anything. Everything a user should see (log
//! lines, per-fragment results, the end-of-call notification) is emitted as
//! a [`ConsoleEvent`] to whatever subscribers the host registered. A GUI can
//! append log lines to a scroll view, a TTY frontend can print them, tests
//! can collect them.

use std::cell::RefCell;

/// Notification emitted by the registry or the execution engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    /// A user-visible text line
    Log { text: String },

    /// One fragment finished executing
    CommandExecuted { success: bool },

    /// A whole `try_execute_command` call finished
    ExecutionFinished { success: bool },

    /// The registered command set (and its derived lists) changed
    ListsChanged,
}

/// Subscriber list shared by the registry and the execution engine.
///
/// Single-threaded by design, like the rest of the engine; see the
/// concurrency notes on [`Console`](crate::console::Console).
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<Box<dyn Fn(&ConsoleEvent)>>>,
}

impl EventBus {
    /// Create an empty event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for all future events
    pub fn subscribe(&self, subscriber: impl Fn(&ConsoleEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    /// Deliver an event to every subscriber, in subscription order
    pub fn emit(&self, event: &ConsoleEvent) {
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(event);
        }
    }

    /// Emit a [`ConsoleEvent::Log`] line
    pub fn log(&self, text: impl Into<String>) {
        self.emit(&ConsoleEvent::Log { text: text.into() });
    }
}

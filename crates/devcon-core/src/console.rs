//! Host-facing console facade
//!
//! [`Console`] wires the config, registry, execution engine and event bus
//! together and exposes the boundary a host application talks to:
//! registration, removal, execution, lifecycle, counters and listing
//! snapshots. Presentation code never touches the registry or the engine
//! directly; all mutation flows through this type.
//!
//! # Concurrency
//!
//! The console is single-threaded by construction: it contains `Rc` and
//! `RefCell` state and is therefore neither `Send` nor `Sync`, so
//! cross-thread registration or execution is a compile error rather than a
//! runtime hazard. The one deliberate handoff is detached command dispatch,
//! which moves a `Send` closure to a background thread and never awaits it.
//!
//! # Example
//!
//! ```
//! use devcon_core::commands::types::{CommandDescriptor, ParamKind, ParamValue};
//! use devcon_core::config::ConsoleConfig;
//! use devcon_core::console::Console;
//!
//! let mut console = Console::new(ConsoleConfig::default());
//! console.register_command(
//!     CommandDescriptor::sync("add", "add", |values| {
//!         let a = values[0].as_ref().and_then(ParamValue::as_i32).unwrap_or(0);
//!         let b = values[1].as_ref().and_then(ParamValue::as_i32).unwrap_or(0);
//!         println!("{}", a + b);
//!         Ok(())
//!     })
//!     .with_params([ParamKind::Int32, ParamKind::Int32]),
//! );
//! console.activate();
//!
//! assert!(console.try_execute_command("add 2,3"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::commands::executor::CommandExecutor;
use crate::commands::registry::CommandRegistry;
use crate::commands::types::CommandDescriptor;
use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;
use crate::events::{ConsoleEvent, EventBus};

/// The in-process command console.
pub struct Console {
    config: Rc<RefCell<ConsoleConfig>>,
    events: Rc<EventBus>,
    registry: Rc<RefCell<CommandRegistry>>,
    executor: CommandExecutor,
}

impl Console {
    /// Create a console with the given behavioral flags.
    ///
    /// The console starts inactive: registrations queue up until
    /// [`activate`](Console::activate) is called.
    pub fn new(config: ConsoleConfig) -> Self {
        let config = Rc::new(RefCell::new(config));
        let events = Rc::new(EventBus::new());
        let registry = Rc::new(RefCell::new(CommandRegistry::new(
            Rc::clone(&config),
            Rc::clone(&events),
        )));
        let executor =
            CommandExecutor::new(Rc::clone(&registry), Rc::clone(&config), Rc::clone(&events));
        Self {
            config,
            events,
            registry,
            executor,
        }
    }

    /// Register a subscriber for log lines and engine notifications
    pub fn subscribe(&self, subscriber: impl Fn(&ConsoleEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    /// Activate the console, draining queued registrations and removals
    pub fn activate(&self) {
        self.registry.borrow_mut().activate();
    }

    /// Clear all state back to inactive (environment reload)
    pub fn reset(&mut self) {
        self.registry.borrow_mut().reset();
        self.executor.reset();
    }

    /// Snapshot of the current behavioral flags
    pub fn config(&self) -> ConsoleConfig {
        self.config.borrow().clone()
    }

    /// Mutate the behavioral flags; derived lists are recomputed because
    /// the presentation mode affects listing visibility
    pub fn update_config(&self, update: impl FnOnce(&mut ConsoleConfig)) {
        update(&mut self.config.borrow_mut());
        let mut registry = self.registry.borrow_mut();
        if registry.is_active() {
            registry.update_lists();
            drop(registry);
            self.events.emit(&ConsoleEvent::ListsChanged);
        }
    }

    /// Register a command, swallowing errors.
    ///
    /// Invalid or duplicate descriptors are dropped; diagnostics go to the
    /// `tracing` log in debug builds only. Use
    /// [`try_register_command`](Console::try_register_command) to observe
    /// the error.
    pub fn register_command(&self, descriptor: CommandDescriptor) {
        if let Err(error) = self.registry.borrow_mut().register(descriptor) {
            if cfg!(debug_assertions) {
                tracing::warn!(%error, "command registration rejected");
            }
        }
    }

    /// Register a command, returning the registration error if any
    pub fn try_register_command(&self, descriptor: CommandDescriptor) -> ConsoleResult<()> {
        self.registry.borrow_mut().register(descriptor)
    }

    /// Remove every command with the given name.
    ///
    /// Before activation the request is queued unless `force` is set; with
    /// `log` set a found/not-found line is emitted through the event bus.
    pub fn remove_command(&self, name: &str, log: bool, force: bool) {
        self.registry.borrow_mut().remove(name, log, force);
    }

    /// Execute one line of raw input, returning the overall success flag
    pub fn try_execute_command(&mut self, raw: &str) -> bool {
        self.executor.try_execute(raw)
    }

    /// Total number of invocation attempts, successful or not
    pub fn executed_command_count(&self) -> u64 {
        self.executor.executed_count()
    }

    /// Number of reported unknown-command inputs
    pub fn failed_command_count(&self) -> u64 {
        self.executor.failed_count()
    }

    /// Number of active descriptors
    pub fn command_count(&self) -> usize {
        self.registry.borrow().command_count()
    }

    /// Snapshot of all active descriptors, in registration order
    pub fn commands(&self) -> Vec<CommandDescriptor> {
        self.registry.borrow().commands().to_vec()
    }

    /// Snapshot of the visible command names
    pub fn command_names(&self) -> Vec<String> {
        self.registry.borrow().command_names().to_vec()
    }

    /// Snapshot of the visible "name + info" listing strings
    pub fn command_names_with_infos(&self) -> Vec<String> {
        self.registry.borrow().names_with_infos().to_vec()
    }

    /// Snapshot of the visible "name + default value" listing strings
    pub fn command_names_with_defaults(&self) -> Vec<String> {
        self.registry.borrow().names_with_defaults().to_vec()
    }

    /// Snapshot of the execution history, oldest first
    pub fn history(&self) -> Vec<String> {
        self.executor.history().snapshot()
    }

    /// Emit the visible command listing through the event bus.
    ///
    /// Lists info texts or plain names and sorts alphabetically according
    /// to the config flags.
    pub fn print_all_commands(&self) {
        let config = self.config.borrow().clone();
        let mut lines: Vec<String> = {
            let registry = self.registry.borrow();
            if config.print_info_texts {
                registry.names_with_infos().to_vec()
            } else {
                registry.command_names().to_vec()
            }
        };

        if config.print_alphabetical {
            lines.sort();
        }

        self.events.log("Available commands:");
        for line in lines {
            self.events.log(line);
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

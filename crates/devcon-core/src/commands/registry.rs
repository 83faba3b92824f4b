//! Command registry
//!
//! Owns the set of live command descriptors, enforces name uniqueness, and
//! derives the listing strings hosts use for autocomplete and help output.
//!
//! # Lifecycle
//!
//! The registry starts `Uninitialized`: registrations and removals made
//! during application bootstrap are queued, not applied. [`activate`]
//! transitions to `Active`, draining queued registrations (skipping entries
//! that became duplicates) and then queued removals, with a single
//! derived-list recompute at the end. [`reset`] returns everything to
//! `Uninitialized` for an environment reload.
//!
//! [`activate`]: CommandRegistry::activate
//! [`reset`]: CommandRegistry::reset

use std::cell::RefCell;
use std::rc::Rc;

use crate::commands::parser::{
    COMMAND_SEPARATOR, COMPOUND_SEPARATOR, PARAM_SEPARATOR, validate_parameter_kinds,
};
use crate::commands::types::CommandDescriptor;
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::events::{ConsoleEvent, EventBus};

/// Registry lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// Registrations and removals are queued
    Uninitialized,
    /// Registrations and removals apply immediately
    Active,
}

/// Owns the live command descriptors and their derived listing strings.
pub struct CommandRegistry {
    state: RegistryState,
    commands: Vec<CommandDescriptor>,
    pending_registrations: Vec<CommandDescriptor>,
    pending_removals: Vec<(String, bool)>,
    command_names: Vec<String>,
    names_with_defaults: Vec<String>,
    names_with_infos: Vec<String>,
    config: Rc<RefCell<ConsoleConfig>>,
    events: Rc<EventBus>,
}

impl CommandRegistry {
    /// Create an uninitialized registry
    pub fn new(config: Rc<RefCell<ConsoleConfig>>, events: Rc<EventBus>) -> Self {
        Self {
            state: RegistryState::Uninitialized,
            commands: Vec::new(),
            pending_registrations: Vec::new(),
            pending_removals: Vec::new(),
            command_names: Vec::new(),
            names_with_defaults: Vec::new(),
            names_with_infos: Vec::new(),
            config,
            events,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RegistryState {
        self.state
    }

    /// Whether the registry has been activated
    pub fn is_active(&self) -> bool {
        self.state == RegistryState::Active
    }

    /// Register a command.
    ///
    /// A malformed descriptor is rejected outright, never queued. While
    /// `Active`, a name collision with a different identity is rejected
    /// (the first registrant wins) and a successful registration recomputes
    /// the derived lists immediately. While `Uninitialized`, the descriptor
    /// is queued and duplicate checking is deferred to [`activate`].
    ///
    /// [`activate`]: CommandRegistry::activate
    pub fn register(&mut self, descriptor: CommandDescriptor) -> ConsoleResult<()> {
        Self::validate(&descriptor)?;

        if descriptor.debug_only && !cfg!(debug_assertions) {
            return Ok(());
        }

        match self.state {
            RegistryState::Uninitialized => {
                self.pending_registrations.push(descriptor);
                Ok(())
            }
            RegistryState::Active => {
                if self.is_duplicate(&descriptor) {
                    return Err(ConsoleError::duplicate(&descriptor.name));
                }
                self.commands.push(descriptor);
                self.update_lists();
                self.events.emit(&ConsoleEvent::ListsChanged);
                Ok(())
            }
        }
    }

    /// Remove every descriptor with the given name.
    ///
    /// While `Uninitialized` the request is queued (idempotently per name)
    /// unless `force` is set. With `log` set, a found/not-found text line is
    /// emitted through the event bus; otherwise removal of a non-existent
    /// name is a silent no-op.
    pub fn remove(&mut self, name: &str, log: bool, force: bool) {
        if self.state == RegistryState::Uninitialized && !force {
            if !self.pending_removals.iter().any(|(pending, _)| pending == name) {
                self.pending_removals.push((name.to_string(), log));
            }
            return;
        }

        self.remove_now(name, log);
        self.update_lists();
        self.events.emit(&ConsoleEvent::ListsChanged);
    }

    /// Transition `Uninitialized -> Active`, draining the queues.
    ///
    /// Queued registrations are applied first (entries that are now
    /// duplicates are skipped), then queued removals, then one derived-list
    /// recompute. Calling this on an already-active registry is a no-op.
    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        self.state = RegistryState::Active;

        let pending = std::mem::take(&mut self.pending_registrations);
        for descriptor in pending {
            if self.is_duplicate(&descriptor) {
                tracing::debug!(name = %descriptor.name, "skipping queued duplicate command");
                continue;
            }
            self.commands.push(descriptor);
        }

        let removals = std::mem::take(&mut self.pending_removals);
        for (name, log) in removals {
            self.remove_now(&name, log);
        }

        self.update_lists();
        self.events.emit(&ConsoleEvent::ListsChanged);
    }

    /// Clear all state back to `Uninitialized` (environment reload)
    pub fn reset(&mut self) {
        self.state = RegistryState::Uninitialized;
        self.commands.clear();
        self.pending_registrations.clear();
        self.pending_removals.clear();
        self.command_names.clear();
        self.names_with_defaults.clear();
        self.names_with_infos.clear();
    }

    /// All active descriptors, in registration order
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Number of active descriptors
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Plain visible command names, first-seen order, de-duplicated
    pub fn command_names(&self) -> &[String] {
        &self.command_names
    }

    /// Visible "name + default value" listing strings
    pub fn names_with_defaults(&self) -> &[String] {
        &self.names_with_defaults
    }

    /// Visible "name + info" listing strings
    pub fn names_with_infos(&self) -> &[String] {
        &self.names_with_infos
    }

    /// Recompute the derived listing strings from the visible descriptors.
    ///
    /// Hidden commands are skipped, as are `hidden_minimal` commands when
    /// the config selects the restricted presentation.
    pub fn update_lists(&mut self) {
        self.command_names.clear();
        self.names_with_defaults.clear();
        self.names_with_infos.clear();

        let minimal = self.config.borrow().minimal_presentation;

        for descriptor in &self.commands {
            if descriptor.hidden {
                continue;
            }
            if descriptor.hidden_minimal && minimal {
                continue;
            }

            if !self.command_names.contains(&descriptor.name) {
                self.command_names.push(descriptor.name.clone());
            }

            if !descriptor.info.trim().is_empty() {
                let full = format!("{} - {}", descriptor.name, descriptor.info);
                if !self.names_with_infos.contains(&full) {
                    self.names_with_infos.push(full);
                }
            } else if !self.names_with_infos.contains(&descriptor.name) {
                self.names_with_infos.push(descriptor.name.clone());
            }

            // the default value is separated from the name by exactly the
            // leading space of the stored text, added here if missing
            let default_value = &descriptor.default_value;
            let full = if default_value.starts_with(COMMAND_SEPARATOR) {
                format!("{}{}", descriptor.name, default_value)
            } else {
                format!("{} {}", descriptor.name, default_value)
            };
            if !self.names_with_defaults.contains(&full) {
                self.names_with_defaults.push(full);
            }
        }
    }

    /// Remove stale descriptors by index, recompute lists once.
    ///
    /// Indices must be in ascending order.
    pub(crate) fn purge_indices(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        for &index in indices.iter().rev() {
            let removed = self.commands.remove(index);
            tracing::debug!(name = %removed.name, "purged stale instance command");
        }
        self.update_lists();
        self.events.emit(&ConsoleEvent::ListsChanged);
    }

    fn remove_now(&mut self, name: &str, log: bool) {
        let before = self.commands.len();
        self.commands.retain(|descriptor| descriptor.name != name);
        let found = self.commands.len() != before;

        if log {
            if found {
                self.events.log(format!("Removed command [{}]", name));
            } else {
                self.events.log(format!("Didn't find command with name [{}]", name));
            }
        }
    }

    fn is_duplicate(&self, descriptor: &CommandDescriptor) -> bool {
        self.commands.iter().any(|existing| {
            existing.name == descriptor.name && existing.identity() != descriptor.identity()
        })
    }

    fn validate(descriptor: &CommandDescriptor) -> ConsoleResult<()> {
        if descriptor.name.is_empty() {
            return Err(ConsoleError::invalid_descriptor("command name is empty"));
        }

        let reserved = [COMMAND_SEPARATOR, PARAM_SEPARATOR, COMPOUND_SEPARATOR];
        if descriptor.name.contains(&reserved[..]) {
            return Err(ConsoleError::invalid_descriptor(format!(
                "command name '{}' contains a reserved separator character",
                descriptor.name
            )));
        }

        if descriptor.param_kinds.len() != descriptor.optional.len() {
            return Err(ConsoleError::invalid_descriptor(format!(
                "command '{}' declares {} parameters but {} optionality flags",
                descriptor.name,
                descriptor.param_kinds.len(),
                descriptor.optional.len()
            )));
        }

        validate_parameter_kinds(&descriptor.param_kinds, descriptor.action.is_detached())
    }
}

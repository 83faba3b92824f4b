//! Execution engine
//!
//! Drives one call to [`try_execute`] through the fixed pipeline: detect
//! compound input, split into fragments, tokenize each fragment, scan the
//! registry for matches, coerce parameters, invoke, and record the outcome.
//!
//! Failure never escalates: an unparsable parameter skips the candidate, a
//! faulting handler is logged and counted as unsuccessful, unknown input
//! produces one text line and a `false` result. No panic and no `Err`
//! crosses this boundary.
//!
//! [`try_execute`]: CommandExecutor::try_execute

use std::cell::RefCell;
use std::rc::Rc;

use crate::commands::parser::{COMPOUND_SEPARATOR, PARAM_SEPARATOR, parse_params, split_compound, split_fragment};
use crate::commands::registry::CommandRegistry;
use crate::commands::types::{CommandAction, ParamValue};
use crate::config::ConsoleConfig;
use crate::events::{ConsoleEvent, EventBus};
use crate::history::ExecutionHistory;

/// A matched descriptor, detached from the registry borrow so handlers can
/// re-enter the console if they choose to.
struct PendingInvocation {
    name: String,
    action: CommandAction,
    values: Vec<Option<ParamValue>>,
}

/// Tokenizes input, matches it against the registry, and invokes commands.
pub struct CommandExecutor {
    registry: Rc<RefCell<CommandRegistry>>,
    config: Rc<RefCell<ConsoleConfig>>,
    events: Rc<EventBus>,
    history: ExecutionHistory,
    executed_count: u64,
    failed_count: u64,
}

impl CommandExecutor {
    /// Create an executor over a shared registry
    pub fn new(
        registry: Rc<RefCell<CommandRegistry>>,
        config: Rc<RefCell<ConsoleConfig>>,
        events: Rc<EventBus>,
    ) -> Self {
        Self {
            registry,
            config,
            events,
            history: ExecutionHistory::new(),
            executed_count: 0,
            failed_count: 0,
        }
    }

    /// Execute one line of raw input.
    ///
    /// Input without a `&` (or with compound input disabled) runs as a
    /// single command. Otherwise the line is split on `&` and every
    /// fragment runs independently; the returned flag is the last
    /// fragment's result. An `ExecutionFinished` event is emitted after
    /// every call.
    pub fn try_execute(&mut self, input: &str) -> bool {
        if !self.registry.borrow().is_active() {
            tracing::warn!("unable to execute command: the console has not been activated");
            return false;
        }

        let contains_separator = input.contains(COMPOUND_SEPARATOR);
        let allow_multiple = self.config.borrow().allow_multiple_commands;

        let mut success = false;

        if !contains_separator || !allow_multiple {
            // a lone attempt on input that still contains `&` stays silent,
            // the compound retry below does the reporting
            success = self.execute_one(input, contains_separator);
        }

        if !success && contains_separator && allow_multiple {
            for fragment in split_compound(input) {
                success = self.execute_one(&fragment, false);
            }
        }

        self.events.emit(&ConsoleEvent::ExecutionFinished { success });
        success
    }

    /// Total number of invocation attempts, successful or not
    pub fn executed_count(&self) -> u64 {
        self.executed_count
    }

    /// Number of reported unknown-command inputs
    pub fn failed_count(&self) -> u64 {
        self.failed_count
    }

    /// Previously accepted raw input
    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    /// Drop history and counters (environment reload)
    pub fn reset(&mut self) {
        self.history.clear();
        self.executed_count = 0;
        self.failed_count = 0;
    }

    /// Execute a single fragment.
    ///
    /// `silent` suppresses the unknown-command report, used for the initial
    /// attempt on input that will be retried as a compound line.
    fn execute_one(&mut self, fragment: &str, silent: bool) -> bool {
        let config = self.config.borrow().clone();

        let matchable = if config.case_sensitive {
            fragment.to_string()
        } else {
            fragment.to_lowercase()
        };
        let (command_token, remainder) = split_fragment(&matchable);
        let tokens: Option<Vec<String>> = remainder
            .map(|text| text.split(PARAM_SEPARATOR).map(String::from).collect());

        let mut invocations: Vec<PendingInvocation> = Vec::new();
        {
            let mut registry = self.registry.borrow_mut();
            let mut stale: Vec<usize> = Vec::new();

            for (index, descriptor) in registry.commands().iter().enumerate() {
                let name = if config.case_sensitive {
                    descriptor.name.as_str()
                } else {
                    descriptor.name_lower.as_str()
                };
                if name != command_token {
                    continue;
                }

                // a command that takes nothing does not match input that
                // carries argument text
                if descriptor.param_kinds.is_empty() && tokens.is_some() {
                    continue;
                }

                let values = if descriptor.param_kinds.is_empty() {
                    Vec::new()
                } else {
                    let values = parse_params(
                        tokens.as_deref(),
                        remainder.unwrap_or(""),
                        &descriptor.param_kinds,
                        &descriptor.optional,
                    );
                    let mismatch = values
                        .iter()
                        .zip(&descriptor.optional)
                        .any(|(value, &optional)| value.is_none() && !optional);
                    if mismatch {
                        continue;
                    }
                    values
                };

                if !descriptor.target.is_alive() {
                    stale.push(index);
                    continue;
                }

                invocations.push(PendingInvocation {
                    name: descriptor.name.clone(),
                    action: descriptor.action.clone(),
                    values,
                });
            }

            registry.purge_indices(&stale);
        }

        let mut success = false;
        for invocation in invocations {
            self.executed_count += 1;
            match invocation.action {
                CommandAction::Detached(handler) => {
                    // hand off and report success immediately; the outcome
                    // of detached work is never observed
                    let argument = invocation.values.into_iter().next().flatten();
                    std::thread::spawn(move || handler(argument));
                    success = true;
                }
                CommandAction::Sync(handler) => {
                    let result = {
                        let mut handler = handler.borrow_mut();
                        (&mut *handler)(&invocation.values)
                    };
                    match result {
                        Ok(()) => success = true,
                        Err(error) => {
                            tracing::debug!(
                                command = %invocation.name,
                                %error,
                                "command invocation faulted"
                            );
                        }
                    }
                }
            }
        }

        if success || config.track_failed_commands {
            self.history.record(fragment, config.track_duplicates);
        }

        if !success && !silent && config.print_unrecognized {
            self.events
                .log(format!("Command '{}' was not recognized.", fragment));
            self.failed_count += 1;
        }

        self.events.emit(&ConsoleEvent::CommandExecuted { success });
        success
    }
}

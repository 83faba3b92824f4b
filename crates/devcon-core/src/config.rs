//! Behavioral flags for the console engine
//!
//! The engine reads these as plain booleans; how they are sourced (settings
//! file, CLI flags, editor UI) is the host application's business. The
//! struct derives serde traits so hosts can persist it alongside their own
//! configuration.

use serde::{Deserialize, Serialize};

/// Behavioral flags read by the registry and the execution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Match command names case-sensitively
    pub case_sensitive: bool,

    /// Allow `&`-separated compound input to run as multiple commands
    pub allow_multiple_commands: bool,

    /// Keep duplicate entries in the execution history
    pub track_duplicates: bool,

    /// Record failed input in the execution history
    pub track_failed_commands: bool,

    /// Emit a text line when input matches no command
    pub print_unrecognized: bool,

    /// `print_all_commands` lists info texts instead of plain names
    pub print_info_texts: bool,

    /// `print_all_commands` sorts output alphabetically
    pub print_alphabetical: bool,

    /// Restricted presentation mode; commands flagged `hidden_minimal`
    /// are excluded from the derived lists
    pub minimal_presentation: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            allow_multiple_commands: true,
            track_duplicates: false,
            track_failed_commands: true,
            print_unrecognized: true,
            print_info_texts: true,
            print_alphabetical: true,
            minimal_presentation: false,
        }
    }
}

impl ConsoleConfig {
    /// Create a config with default flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Set case-sensitive matching
    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// Enable or disable compound command input
    pub fn with_multiple_commands(mut self, value: bool) -> Self {
        self.allow_multiple_commands = value;
        self
    }

    /// Enable or disable duplicate history entries
    pub fn with_track_duplicates(mut self, value: bool) -> Self {
        self.track_duplicates = value;
        self
    }

    /// Enable or disable recording of failed input
    pub fn with_track_failed_commands(mut self, value: bool) -> Self {
        self.track_failed_commands = value;
        self
    }

    /// Enable or disable the unrecognized-command report
    pub fn with_print_unrecognized(mut self, value: bool) -> Self {
        self.print_unrecognized = value;
        self
    }

    /// Switch to the restricted presentation mode
    pub fn with_minimal_presentation(mut self, value: bool) -> Self {
        self.minimal_presentation = value;
        self
    }
}

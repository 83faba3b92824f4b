//! Error types for the console engine

use thiserror::Error;

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Main error type for the console engine.
///
/// Every variant is local and recoverable: registration errors are returned
/// to the caller, execution errors degrade to a `false` result plus an event
/// line. Nothing here ever crosses [`try_execute_command`] as a panic or an
/// `Err`.
///
/// [`try_execute_command`]: crate::console::Console::try_execute_command
#[derive(Error, Debug, Clone)]
pub enum ConsoleError {
    /// Malformed name or parameter list, rejected at registration
    #[error("Invalid command descriptor: {0}")]
    InvalidDescriptor(String),

    /// A command with this name but a different identity already exists
    #[error("Command '{name}' has already been registered")]
    DuplicateCommand { name: String },

    /// Parameter kind outside the supported set
    #[error("Unsupported parameter kind: {0}")]
    UnsupportedParameterKind(String),

    /// Instance command whose owner no longer exists
    #[error("Command '{name}' lost its owner")]
    StaleTarget { name: String },

    /// No descriptor matched the input
    #[error("Command '{0}' was not recognized")]
    UnknownCommand(String),

    /// The invoked command itself faulted
    #[error("Command faulted: {0}")]
    InvocationFault(String),
}

impl ConsoleError {
    /// Create a new invalid-descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }

    /// Create a new duplicate-command error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Create a new stale-target error
    pub fn stale_target(name: impl Into<String>) -> Self {
        Self::StaleTarget { name: name.into() }
    }

    /// Create a new invocation-fault error
    pub fn fault(message: impl Into<String>) -> Self {
        Self::InvocationFault(message.into())
    }
}

//! Devcon Core Library
//!
//! This crate provides the engine behind the devcon developer console:
//! command registration and deduplication, input tokenization, compound
//! command splitting, type-directed parameter coercion, and invocation with
//! failure tracking. Presentation is deliberately out of scope: hosts feed
//! raw input to [`Console::try_execute_command`] and render the text lines
//! the engine emits through its event bus.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod history;

// Re-export commonly used types
pub use commands::{
    CommandAction, CommandDescriptor, CommandExecutor, CommandRegistry, CommandTarget, ParamKind,
    ParamValue, Quat, RegistryState, Vec2, Vec3, Vec4,
};
pub use config::ConsoleConfig;
pub use console::Console;
pub use error::{ConsoleError, ConsoleResult};
pub use events::{ConsoleEvent, EventBus};
pub use history::ExecutionHistory;

//! Command registry and execution engine
//!
//! # Overview
//!
//! Application code registers commands as [`CommandDescriptor`] values: a
//! name, a handler closure, the ordered [`ParamKind`] list the handler
//! expects, and listing metadata. At runtime the [`CommandExecutor`] takes
//! raw input lines, splits compound `&`-separated input into fragments,
//! tokenizes each fragment, scans the [`CommandRegistry`] for a matching
//! descriptor, coerces the tokens into [`ParamValue`]s, and invokes the
//! handler.
//!
//! ```text
//! raw input
//!     |
//!     v
//! CommandExecutor::try_execute
//!     |-- split on '&' (compound input)
//!     v
//! execute_one, per fragment
//!     |-- split off command token, comma-split argument text
//!     |-- scan CommandRegistry for a name match
//!     |-- parser::parse_params coerces tokens per declared kind
//!     |-- invoke (sync inline, detached on a background thread)
//!     v
//! history + counters + ConsoleEvent notifications
//! ```
//!
//! Matching is tolerant by design: a token that does not parse makes the
//! candidate not match, it does not raise an error. Unknown input produces
//! one configurable text line and a `false` result.

pub mod executor;
pub mod parser;
pub mod registry;
pub mod types;

pub use executor::CommandExecutor;
pub use registry::{CommandRegistry, RegistryState};
pub use types::{
    CommandAction, CommandDescriptor, CommandTarget, ParamKind, ParamValue, Quat, Vec2, Vec3, Vec4,
};

//! Command descriptor and parameter value types
//!
//! A [`CommandDescriptor`] is the immutable record of one registrable
//! command: its name, its callable binding, the ordered parameter kinds the
//! binding expects, and presentation metadata. Descriptors are built with
//! the `CommandDescriptor::sync`/`CommandDescriptor::detached` constructors
//! plus `with_*` builder methods, then handed to the registry.
//!
//! Parameter passing is type-directed rather than reflective: the closed
//! [`ParamKind`] set names every coercible kind, coerced values travel as
//! [`ParamValue`] variants, and handlers receive a boxed slice of
//! `Option<ParamValue>` aligned with the declared kinds (`None` marks an
//! absent optional parameter).

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::ConsoleResult;

/// Two-component aggregate parameter value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Three-component aggregate parameter value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Four-component aggregate parameter value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

/// Rotation aggregate parameter value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

/// The closed set of coercible parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Int32,
    Float32,
    Float64,
    Decimal,
    Bool,
    Char,
    Str,
    StrArray,
    Vector2,
    Vector3,
    Vector4,
    Quaternion,
}

impl ParamKind {
    /// Composite kinds consume the entire remaining argument text as one
    /// value and therefore cannot coexist with sibling parameters.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            Self::StrArray | Self::Vector2 | Self::Vector3 | Self::Vector4 | Self::Quaternion
        )
    }

    /// Numeric scalar kinds accept the `f` float-literal suffix.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int32 | Self::Float32 | Self::Float64 | Self::Decimal)
    }

    /// Component count for the numeric aggregate kinds
    pub(crate) fn component_count(self) -> Option<usize> {
        match self {
            Self::Vector2 => Some(2),
            Self::Vector3 => Some(3),
            Self::Vector4 | Self::Quaternion => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int32 => "int32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Str => "string",
            Self::StrArray => "string[]",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
            Self::Vector4 => "vector4",
            Self::Quaternion => "quaternion",
        };
        write!(f, "{}", name)
    }
}

/// A coerced parameter value, one variant per [`ParamKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int32(i32),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Bool(bool),
    Char(char),
    Str(String),
    StrArray(Vec<String>),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Quaternion(Quat),
}

impl ParamValue {
    /// The kind this value belongs to
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Int32(_) => ParamKind::Int32,
            Self::Float32(_) => ParamKind::Float32,
            Self::Float64(_) => ParamKind::Float64,
            Self::Decimal(_) => ParamKind::Decimal,
            Self::Bool(_) => ParamKind::Bool,
            Self::Char(_) => ParamKind::Char,
            Self::Str(_) => ParamKind::Str,
            Self::StrArray(_) => ParamKind::StrArray,
            Self::Vector2(_) => ParamKind::Vector2,
            Self::Vector3(_) => ParamKind::Vector3,
            Self::Vector4(_) => ParamKind::Vector4,
            Self::Quaternion(_) => ParamKind::Quaternion,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str_array(&self) -> Option<&[String]> {
        match self {
            Self::StrArray(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vector2(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vector3(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<Vec4> {
        match self {
            Self::Vector4(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_quat(&self) -> Option<Quat> {
        match self {
            Self::Quaternion(value) => Some(*value),
            _ => None,
        }
    }
}

/// Handler signature for synchronous commands.
///
/// The slice is aligned with the descriptor's declared parameter kinds;
/// `None` marks an optional parameter the caller omitted. A returned `Err`
/// is the invocation-fault case: logged, counted as not-successful, never
/// propagated.
pub type SyncHandler = Rc<RefCell<dyn FnMut(&[Option<ParamValue>]) -> ConsoleResult<()>>>;

/// Handler signature for detached (fire-and-forget) commands.
///
/// Runs on a background thread, so it must be `Send + Sync`; the engine
/// never observes its outcome.
pub type DetachedHandler = Arc<dyn Fn(Option<ParamValue>) + Send + Sync>;

/// The callable binding of a command.
#[derive(Clone)]
pub enum CommandAction {
    /// Invoked inline; outcome observed and counted
    Sync(SyncHandler),
    /// Handed off to a background thread; always counted as successful
    Detached(DetachedHandler),
}

impl CommandAction {
    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached(_))
    }
}

impl fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => write!(f, "CommandAction::Sync"),
            Self::Detached(_) => write!(f, "CommandAction::Detached"),
        }
    }
}

/// Ownership of the invocation target.
///
/// Instance commands hold a weak back-reference to their owner; the registry
/// checks liveness before every invocation and lazily purges descriptors
/// whose owner has been dropped.
#[derive(Debug, Clone)]
pub enum CommandTarget {
    /// Free function or closure with no owning object
    Static,
    /// Bound to an application object that may be dropped at any time
    Instance { owner: Weak<dyn Any> },
}

impl CommandTarget {
    /// Whether the target can still be invoked
    pub fn is_alive(&self) -> bool {
        match self {
            Self::Static => true,
            Self::Instance { owner } => owner.strong_count() > 0,
        }
    }
}

/// Immutable record of one registrable command.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Case-preserving command name
    pub name: String,
    /// Lowercase cache for case-insensitive matching
    pub name_lower: String,
    /// Identity string for duplicate detection (method or closure name)
    pub method_name: String,
    /// Identity string for duplicate detection (owning type, or "static")
    pub owner_type_name: String,
    /// Ownership of the invocation target
    pub target: CommandTarget,
    /// The callable binding
    pub action: CommandAction,
    /// Ordered parameter kinds
    pub param_kinds: Vec<ParamKind>,
    /// Parallel optionality flags, one per parameter
    pub optional: Vec<bool>,
    /// Default-value text shown in listings; no parsing semantics
    pub default_value: String,
    /// Info text shown in listings; no parsing semantics
    pub info: String,
    /// Excluded from all derived listings
    pub hidden: bool,
    /// Excluded from listings in the restricted presentation mode
    pub hidden_minimal: bool,
    /// Registration is a silent no-op in release builds
    pub debug_only: bool,
}

impl CommandDescriptor {
    fn with_action(
        name: impl Into<String>,
        method_name: impl Into<String>,
        action: CommandAction,
    ) -> Self {
        let name = name.into();
        let name_lower = name.to_lowercase();
        Self {
            name,
            name_lower,
            method_name: method_name.into(),
            owner_type_name: "static".to_string(),
            target: CommandTarget::Static,
            action,
            param_kinds: Vec::new(),
            optional: Vec::new(),
            default_value: String::new(),
            info: String::new(),
            hidden: false,
            hidden_minimal: false,
            debug_only: false,
        }
    }

    /// Create a descriptor for a synchronous handler with no parameters.
    ///
    /// `method_name` is the identity string used for duplicate detection;
    /// by convention the name of the function the handler wraps.
    pub fn sync<F>(name: impl Into<String>, method_name: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&[Option<ParamValue>]) -> ConsoleResult<()> + 'static,
    {
        Self::with_action(
            name,
            method_name,
            CommandAction::Sync(Rc::new(RefCell::new(handler))),
        )
    }

    /// Create a descriptor for a detached (fire-and-forget) handler.
    ///
    /// Detached commands accept at most one parameter; the engine hands the
    /// coerced value to the handler on a background thread and reports
    /// success without waiting.
    pub fn detached<F>(name: impl Into<String>, method_name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<ParamValue>) + Send + Sync + 'static,
    {
        Self::with_action(name, method_name, CommandAction::Detached(Arc::new(handler)))
    }

    /// Declare the ordered parameter kinds; all required by default
    pub fn with_params(mut self, kinds: impl IntoIterator<Item = ParamKind>) -> Self {
        self.param_kinds = kinds.into_iter().collect();
        self.optional = vec![false; self.param_kinds.len()];
        self
    }

    /// Mark parameters from `index` onward as optional
    pub fn with_optional_from(mut self, index: usize) -> Self {
        for flag in self.optional.iter_mut().skip(index) {
            *flag = true;
        }
        self
    }

    /// Override the per-parameter optionality flags
    pub fn with_optionals(mut self, optional: impl IntoIterator<Item = bool>) -> Self {
        self.optional = optional.into_iter().collect();
        self
    }

    /// Bind this command to an owning application object.
    ///
    /// The descriptor keeps only a weak back-reference; dropping the last
    /// strong handle makes the command stale and it is purged on the next
    /// match attempt.
    pub fn for_instance<T: Any>(mut self, owner: &Rc<T>) -> Self {
        let strong: Rc<dyn Any> = Rc::clone(owner) as Rc<dyn Any>;
        self.target = CommandTarget::Instance {
            owner: Rc::downgrade(&strong),
        };
        self.owner_type_name = std::any::type_name::<T>().to_string();
        self
    }

    /// Set the default-value text shown in listings
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Set the info text shown in listings
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Exclude this command from all derived listings
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Exclude this command from listings in the restricted presentation mode
    pub fn hidden_in_minimal(mut self) -> Self {
        self.hidden_minimal = true;
        self
    }

    /// Make registration a silent no-op in release builds
    pub fn debug_only(mut self) -> Self {
        self.debug_only = true;
        self
    }

    /// Identity triple used for duplicate detection
    pub(crate) fn identity(&self) -> (&str, &str, &[ParamKind]) {
        (&self.owner_type_name, &self.method_name, &self.param_kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &[Option<ParamValue>]) -> ConsoleResult<()> {
        Ok(())
    }

    #[test]
    fn test_builder_defaults() {
        let descriptor = CommandDescriptor::sync("reset", "reset_game", noop);
        assert_eq!(descriptor.name, "reset");
        assert_eq!(descriptor.name_lower, "reset");
        assert!(descriptor.param_kinds.is_empty());
        assert!(!descriptor.hidden);
        assert!(descriptor.target.is_alive());
    }

    #[test]
    fn test_with_params_marks_all_required() {
        let descriptor = CommandDescriptor::sync("add", "add", noop)
            .with_params([ParamKind::Int32, ParamKind::Int32]);
        assert_eq!(descriptor.optional, [false, false]);
    }

    #[test]
    fn test_optional_from_marks_trailing_params() {
        let descriptor = CommandDescriptor::sync("spawn", "spawn", noop)
            .with_params([ParamKind::Str, ParamKind::Int32, ParamKind::Int32])
            .with_optional_from(1);
        assert_eq!(descriptor.optional, [false, true, true]);
    }

    #[test]
    fn test_instance_target_goes_stale_when_owner_drops() {
        struct Player;

        let player = Rc::new(Player);
        let descriptor = CommandDescriptor::sync("heal", "heal", noop).for_instance(&player);
        assert!(descriptor.target.is_alive());

        drop(player);
        assert!(!descriptor.target.is_alive());
    }

    #[test]
    fn test_name_lower_preserves_original_name() {
        let descriptor = CommandDescriptor::sync("SetFOV", "set_fov", noop);
        assert_eq!(descriptor.name, "SetFOV");
        assert_eq!(descriptor.name_lower, "setfov");
    }

    #[test]
    fn test_param_kind_classification() {
        assert!(ParamKind::Vector3.is_composite());
        assert!(ParamKind::StrArray.is_composite());
        assert!(!ParamKind::Float32.is_composite());
        assert!(ParamKind::Decimal.is_numeric());
        assert!(!ParamKind::Bool.is_numeric());
    }

    #[test]
    fn test_param_value_accessors() {
        assert_eq!(ParamValue::Int32(7).as_i32(), Some(7));
        assert_eq!(ParamValue::Int32(7).as_f32(), None);
        assert_eq!(
            ParamValue::Vector2(Vec2::new(1.0, 2.0)).as_vec2(),
            Some(Vec2::new(1.0, 2.0))
        );
    }
}

//! Input tokenization and type-directed parameter coercion
//!
//! Pure functions, no registry or engine state. The text syntax is fixed:
//! a space separates the command name from its argument text, commas
//! separate scalar parameter tokens, `&` separates compound commands, and
//! numeric tokens may carry the `f` float-literal suffix.
//!
//! Coercion never fails loudly: an unparsable token yields `None`, which the
//! execution engine treats as "this candidate does not match" rather than an
//! error.

use crate::commands::types::{ParamKind, ParamValue, Quat, Vec2, Vec3, Vec4};
use crate::error::{ConsoleError, ConsoleResult};

/// Separates independent commands within one input line
pub const COMPOUND_SEPARATOR: char = '&';

/// Separates scalar/array parameter tokens within the argument text
pub const PARAM_SEPARATOR: char = ',';

/// Separates the command name from its argument text
pub const COMMAND_SEPARATOR: char = ' ';

/// Float-literal suffix stripped from numeric tokens before parsing
pub const FLOAT_SUFFIX: char = 'f';

/// Parameter count ceiling enforced at registration
pub const MAX_PARAMETERS: usize = 9;

/// Split compound input on `&` into independent command fragments.
///
/// Leading spaces are stripped from each fragment and empty fragments
/// (from `&&` or stray separators) are discarded.
pub fn split_compound(input: &str) -> Vec<String> {
    input
        .split(COMPOUND_SEPARATOR)
        .map(|fragment| fragment.trim_start_matches(COMMAND_SEPARATOR))
        .filter(|fragment| !fragment.is_empty())
        .map(String::from)
        .collect()
}

/// Split one fragment into the command token and the verbatim remainder
/// after the first space. An empty remainder counts as no remainder.
pub fn split_fragment(fragment: &str) -> (&str, Option<&str>) {
    match fragment.find(COMMAND_SEPARATOR) {
        Some(index) => {
            let command = &fragment[..index];
            let remainder = &fragment[index + 1..];
            if remainder.is_empty() {
                (command, None)
            } else {
                (command, Some(remainder))
            }
        }
        None => (fragment, None),
    }
}

/// Remove every float-literal suffix character from a token
pub fn strip_float_suffix(token: &str) -> String {
    token.chars().filter(|&c| c != FLOAT_SUFFIX).collect()
}

/// Coerce one comma-separated token into a scalar value.
///
/// All scalar kinds trim surrounding whitespace; numeric kinds additionally
/// strip the `f` suffix. Returns `None` when the token does not parse.
pub fn coerce_scalar(token: &str, kind: ParamKind) -> Option<ParamValue> {
    let cleaned = if kind.is_numeric() {
        strip_float_suffix(token)
    } else {
        token.to_string()
    };
    let cleaned = cleaned.trim();

    match kind {
        ParamKind::Int32 => cleaned.parse::<i32>().ok().map(ParamValue::Int32),
        ParamKind::Float32 => cleaned.parse::<f32>().ok().map(ParamValue::Float32),
        ParamKind::Float64 => cleaned.parse::<f64>().ok().map(ParamValue::Float64),
        ParamKind::Decimal => cleaned.parse().ok().map(ParamValue::Decimal),
        ParamKind::Bool => {
            if cleaned.eq_ignore_ascii_case("true") {
                Some(ParamValue::Bool(true))
            } else if cleaned.eq_ignore_ascii_case("false") {
                Some(ParamValue::Bool(false))
            } else {
                None
            }
        }
        ParamKind::Char => {
            let mut chars = cleaned.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(ParamValue::Char(c)),
                _ => None,
            }
        }
        ParamKind::Str => Some(ParamValue::Str(cleaned.to_string())),
        // composite kinds are handled by coerce_composite
        _ => None,
    }
}

/// Coerce the entire remaining argument text into a composite value.
///
/// String arrays split on commas and trim each piece; numeric aggregates
/// strip the `f` suffix, split on commas if any are present else on
/// whitespace, and require an exact component count.
pub fn coerce_composite(remaining: &str, kind: ParamKind, optional: bool) -> Option<ParamValue> {
    match kind {
        ParamKind::StrArray => {
            if remaining.trim().is_empty() {
                return optional.then(|| ParamValue::StrArray(Vec::new()));
            }
            let words = remaining
                .split(PARAM_SEPARATOR)
                .map(|word| word.trim().to_string())
                .collect();
            Some(ParamValue::StrArray(words))
        }
        ParamKind::Vector2 | ParamKind::Vector3 | ParamKind::Vector4 | ParamKind::Quaternion => {
            let cleaned = strip_float_suffix(remaining);
            let pieces: Vec<&str> = if cleaned.contains(PARAM_SEPARATOR) {
                cleaned.split(PARAM_SEPARATOR).collect()
            } else {
                cleaned.split_whitespace().collect()
            };

            let components: Vec<f64> = pieces
                .iter()
                .filter_map(|piece| piece.trim().parse::<f64>().ok())
                .collect();

            if Some(components.len()) != kind.component_count() {
                return None;
            }

            Some(match kind {
                ParamKind::Vector2 => ParamValue::Vector2(Vec2::new(components[0], components[1])),
                ParamKind::Vector3 => {
                    ParamValue::Vector3(Vec3::new(components[0], components[1], components[2]))
                }
                ParamKind::Vector4 => ParamValue::Vector4(Vec4::new(
                    components[0],
                    components[1],
                    components[2],
                    components[3],
                )),
                ParamKind::Quaternion => ParamValue::Quaternion(Quat::new(
                    components[0],
                    components[1],
                    components[2],
                    components[3],
                )),
                _ => unreachable!(),
            })
        }
        _ => None,
    }
}

/// Coerce every declared parameter from the tokenized argument text.
///
/// The result is aligned with `kinds`; `None` marks a token that was absent
/// or did not parse. Judging whether a `None` is acceptable (optional
/// parameter) is left to the execution engine's match check. Surplus tokens
/// beyond the declared parameter count are ignored.
pub fn parse_params(
    tokens: Option<&[String]>,
    remaining: &str,
    kinds: &[ParamKind],
    optional: &[bool],
) -> Vec<Option<ParamValue>> {
    let mut values = Vec::with_capacity(kinds.len());
    for (index, &kind) in kinds.iter().enumerate() {
        let value = if kind.is_composite() {
            coerce_composite(remaining, kind, optional.get(index).copied().unwrap_or(false))
        } else {
            tokens
                .and_then(|tokens| tokens.get(index))
                .and_then(|token| coerce_scalar(token, kind))
        };
        values.push(value);
    }
    values
}

/// Validate a declared parameter list at registration time.
///
/// At most [`MAX_PARAMETERS`] parameters; detached commands accept at most
/// one; composite kinds consume the whole argument text and therefore
/// cannot coexist with sibling parameters.
pub fn validate_parameter_kinds(kinds: &[ParamKind], detached: bool) -> ConsoleResult<()> {
    if kinds.is_empty() {
        return Ok(());
    }

    if kinds.len() > MAX_PARAMETERS {
        return Err(ConsoleError::invalid_descriptor(format!(
            "commands are limited to {} parameters, got {}",
            MAX_PARAMETERS,
            kinds.len()
        )));
    }

    if detached && kinds.len() > 1 {
        return Err(ConsoleError::invalid_descriptor(
            "detached commands are limited to one parameter",
        ));
    }

    if kinds.len() >= 2 {
        if let Some(composite) = kinds.iter().find(|kind| kind.is_composite()) {
            return Err(ConsoleError::invalid_descriptor(format!(
                "{} consumes the entire argument text and cannot be combined with other parameters",
                composite
            )));
        }
    }

    Ok(())
}

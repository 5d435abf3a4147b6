//! Evaluation runtime: the context expressions are evaluated against and the helper library
//! the node variants call into.

pub(crate) mod bezier;
pub(crate) mod curve;
pub(crate) mod interpolate;

use std::sync::Arc;

use crate::foundation::color::{Color, parse_css_color};
use crate::foundation::error::{EvalError, EvalResult};
use crate::types::{Type, matches};
use crate::value::{Properties, Value, format_number};

pub use bezier::{BezierCache, UnitBezier};
pub use curve::Interpolation;
pub use interpolate::{InterpolateFn, Interpolators};

/// Long-lived evaluation state shared by every call of a compiled expression.
///
/// Holds the memoized cubic-bezier easings and the interpolator registry. Both are read-mostly;
/// the easing cache is append-only.
#[derive(Debug, Default)]
pub struct Runtime {
    /// Cubic-bezier easing memo keyed by control points.
    pub bezier: BezierCache,
    /// Interpolators keyed by result type name.
    pub interpolators: Interpolators,
}

impl Runtime {
    /// Runtime with an explicit interpolator registry.
    pub fn with_interpolators(interpolators: Interpolators) -> Self {
        Self {
            bezier: BezierCache::default(),
            interpolators,
        }
    }
}

/// Inputs of one evaluation: zoom, feature properties and lexical bindings.
///
/// A fresh context is built for every call; nothing in it outlives the evaluation.
pub struct EvaluationContext<'a> {
    zoom: f64,
    properties: &'a Properties,
    runtime: &'a Runtime,
    scope: Vec<(Arc<str>, Value)>,
}

impl<'a> EvaluationContext<'a> {
    pub(crate) fn new(zoom: f64, properties: &'a Properties, runtime: &'a Runtime) -> Self {
        Self {
            zoom,
            properties,
            runtime,
            scope: Vec::new(),
        }
    }

    pub(crate) fn zoom(&self) -> f64 {
        self.zoom
    }

    pub(crate) fn properties(&self) -> &'a Properties {
        self.properties
    }

    pub(crate) fn runtime(&self) -> &'a Runtime {
        self.runtime
    }

    pub(crate) fn scope_len(&self) -> usize {
        self.scope.len()
    }

    pub(crate) fn bind(&mut self, name: Arc<str>, value: Value) {
        self.scope.push((name, value));
    }

    pub(crate) fn unbind_to(&mut self, len: usize) {
        self.scope.truncate(len);
    }

    pub(crate) fn lookup(&self, name: &str) -> EvalResult<Value> {
        self.scope
            .iter()
            .rev()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| EvalError::new(format!("Unknown variable \"{name}\".")))
    }
}

pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> EvalResult<()> {
    if condition {
        Ok(())
    } else {
        Err(EvalError::new(message()))
    }
}

/// Bounds-checked array access; `index` must be an integer in `[0, len)`.
pub fn at(index: f64, items: &[Value]) -> EvalResult<Value> {
    ensure(index >= 0.0 && index < items.len() as f64, || {
        format!(
            "Array index out of bounds: {} > {}.",
            format_number(index),
            items.len()
        )
    })?;
    ensure(index.fract() == 0.0, || {
        format!(
            "Array index must be an integer, but found {} instead.",
            format_number(index)
        )
    })?;
    Ok(items[index as usize].clone())
}

/// Look up `key` in an object value; fails when `obj` is not an object or the key is absent.
pub fn get(obj: &Value, key: &str) -> EvalResult<Value> {
    ensure(has(obj, key)?, || format!("Property '{key}' not found in object"))?;
    match obj {
        Value::Object(map) => Ok(map.get(key).cloned().unwrap_or(Value::Null)),
        _ => Err(EvalError::new("Expected value to be of type Object.")),
    }
}

/// Look up `key` in the feature's properties; fails when the key is absent.
pub fn get_property(properties: &Properties, key: &str) -> EvalResult<Value> {
    properties
        .get(key)
        .cloned()
        .ok_or_else(|| EvalError::new(format!("Property '{key}' not found in feature.properties")))
}

/// Whether an object value contains `key`; fails when `obj` is not an object.
pub fn has(obj: &Value, key: &str) -> EvalResult<bool> {
    ensure(!obj.is_null(), || {
        format!("Cannot get property {key} from null object.")
    })?;
    match as_type(obj, &Type::Object)? {
        Value::Object(map) => Ok(map.contains_key(key)),
        _ => Err(EvalError::new("Expected value to be of type Object.")),
    }
}

/// Runtime type assertion.
///
/// Passes when `value` is valid and either it is null and `expected` is `Null`, or its runtime
/// type matches `expected`. Null never satisfies a non-null type at runtime.
pub fn as_type<'v>(value: &'v Value, expected: &Type) -> EvalResult<&'v Value> {
    ensure(value.is_valid(), || format!("Invalid value {value}."))?;
    let actual = value.type_of();
    let ok = if value.is_null() {
        *expected == Type::Null
    } else {
        matches(expected, &actual)
    };
    ensure(ok, || {
        format!("Expected value to be of type {expected}, but found {actual} instead.")
    })?;
    Ok(value)
}

/// Name of the runtime type of `value`.
pub fn type_name(value: &Value) -> String {
    value.type_of().name()
}

/// Explicit numeric coercion.
pub fn to_number(value: &Value) -> EvalResult<f64> {
    let n = match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    };
    match n {
        Some(n) if !n.is_nan() => Ok(n),
        _ => Err(EvalError::new(format!(
            "Could not convert {} to number.",
            value.to_json()
        ))),
    }
}

/// Decimal literal, or a signed `Infinity`. Rejects the `inf`/`nan` spellings `f64::from_str`
/// also accepts.
fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    match s.strip_prefix(['+', '-']).unwrap_or(s) {
        "Infinity" if s.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        body if body.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) => {
            None
        }
        _ => s.parse().ok(),
    }
}

/// Explicit string coercion of a primitive value.
pub fn to_string(value: &Value) -> EvalResult<String> {
    match value {
        Value::Null => Ok("null".to_owned()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(format_number(*n)),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(EvalError::new(format!(
            "Expected a primitive value in [\"string\", ...], but found {} instead.",
            type_name(other)
        ))),
    }
}

/// Truthiness coercion: false for null, false, 0, NaN and the empty string.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Build a color from r, g, b in `[0, 255]` and optional alpha in `[0, 1]`.
pub fn rgba(r: f64, g: f64, b: f64, a: Option<f64>) -> EvalResult<Color> {
    let shown = || {
        let a = a.unwrap_or(1.0);
        [r, g, b, a]
            .iter()
            .map(|&c| format_number(c))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let in_byte_range = |c: f64| (0.0..=255.0).contains(&c);
    ensure(
        in_byte_range(r) && in_byte_range(g) && in_byte_range(b),
        || {
            format!(
                "Invalid rgba value [{}]: 'r', 'g', and 'b' must be between 0 and 255.",
                shown()
            )
        },
    )?;
    ensure(a.is_none_or(|a| (0.0..=1.0).contains(&a)), || {
        format!("Invalid rgba value [{}]: 'a' must be between 0 and 1.", shown())
    })?;
    Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, a.unwrap_or(1.0)))
}

/// Parse a CSS color string or fail with an evaluation error.
pub fn parse_color(input: &str) -> EvalResult<Color> {
    parse_css_color(input)
        .ok_or_else(|| EvalError::new(format!("Could not parse color from value '{input}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/library.rs"]
mod tests;

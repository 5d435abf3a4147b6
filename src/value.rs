//! Runtime values produced and consumed by expressions.

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::color::Color;
use crate::types::Type;

/// Feature properties keyed by attribute name.
pub type Properties = BTreeMap<String, Value>;

/// Tagged runtime value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    String(String),
    /// Color with channels in `[0, 1]`.
    Color(Color),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// String-keyed mapping.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// True when every nested color is well-formed.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Color(c) => c.is_valid(),
            Self::Array(items) => items.iter().all(Self::is_valid),
            Self::Object(map) => map.values().all(Self::is_valid),
            _ => true,
        }
    }

    /// Runtime type of this value.
    ///
    /// Arrays get the common item type when all items share one, `Value` otherwise, and always
    /// carry their length.
    pub fn type_of(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Bool(_) => Type::Boolean,
            Self::Number(_) => Type::Number,
            Self::String(_) => Type::String,
            Self::Color(_) => Type::Color,
            Self::Object(_) => Type::Object,
            Self::Array(items) => {
                let mut item: Option<Type> = None;
                for v in items {
                    let t = v.type_of();
                    match &item {
                        None => item = Some(t),
                        Some(prev) if *prev == t => {}
                        Some(_) => {
                            item = Some(Type::Value);
                            break;
                        }
                    }
                }
                Type::array(item.unwrap_or(Type::Value), Some(items.len()))
            }
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Wire (JSON) form. Colors become `[r, g, b, a]` on the wire scale.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Self::Null => J::Null,
            Self::Bool(b) => J::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => J::String(s.clone()),
            Self::Color(c) => J::Array(c.to_wire().iter().map(|&x| number_to_json(x)).collect()),
            Self::Array(items) => J::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => J::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Largest integer an f64 represents exactly along with all smaller integers (2^53 - 1).
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// JSON number for `n`, using an integer representation when exact. Non-finite numbers map to
/// `null` since JSON cannot carry them.
pub(crate) fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

/// String form of a number as used for match labels and `to-string`.
///
/// Integral values print without a fractional part and both zeros print as `0`. Magnitudes
/// from 1e21 up, or below 1e-6, use exponent notation with an explicit sign (`1e+21`, `1.5e-7`).
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    format!("{n}")
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::from(&v)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => Self::Null,
            J::Bool(b) => Self::Bool(*b),
            J::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            J::String(s) => Self::String(s.clone()),
            J::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            J::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Array(_) | Self::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

/// Build [`Properties`] from a JSON object; any other JSON yields an empty map.
pub fn properties_from_json(v: &serde_json::Value) -> Properties {
    match Value::from(v) {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/value.rs"]
mod tests;

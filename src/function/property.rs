use std::collections::BTreeMap;

use serde_json::Value as Json;

use crate::types::Type;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Schema of a style property: its value type and optional default.
///
/// Deserialized from the style reference's property entries, e.g.
/// `{"type": "color", "default": "#000000"}`.
pub enum PropertySpec {
    /// Numeric property.
    Number {
        /// Default value.
        #[serde(default)]
        default: Option<Json>,
    },
    /// Free-form string property.
    String {
        /// Default value.
        #[serde(default)]
        default: Option<Json>,
    },
    /// Boolean property.
    Boolean {
        /// Default value.
        #[serde(default)]
        default: Option<Json>,
    },
    /// Color property; defaults are CSS color strings.
    Color {
        /// Default value.
        #[serde(default)]
        default: Option<Json>,
    },
    /// String property restricted to a fixed set of values.
    Enum {
        /// Allowed values, keyed by value, with their documentation.
        #[serde(default)]
        values: BTreeMap<String, Json>,
        /// Default value.
        #[serde(default)]
        default: Option<Json>,
    },
    /// Array property with primitive items.
    Array {
        /// Item kind: `number`, `string` or `boolean`.
        value: String,
        /// Fixed length, if any.
        #[serde(default)]
        length: Option<usize>,
        /// Default value.
        #[serde(default)]
        default: Option<Json>,
    },
}

impl PropertySpec {
    /// Type the compiled property expression must produce.
    pub fn expected_type(&self) -> Type {
        match self {
            Self::Number { .. } => Type::Number,
            Self::String { .. } | Self::Enum { .. } => Type::String,
            Self::Boolean { .. } => Type::Boolean,
            Self::Color { .. } => Type::Color,
            Self::Array { value, length, .. } => Type::array(item_type(value), *length),
        }
    }

    /// Declared default, if any.
    pub fn default_value(&self) -> Option<&Json> {
        match self {
            Self::Number { default }
            | Self::String { default }
            | Self::Boolean { default }
            | Self::Color { default }
            | Self::Enum { default, .. }
            | Self::Array { default, .. } => default.as_ref(),
        }
    }

    /// Whether legacy functions over this property interpolate by default.
    pub fn is_interpolatable(&self) -> bool {
        match self {
            Self::Number { .. } | Self::Color { .. } => true,
            Self::Array { value, .. } => value == "number",
            Self::String { .. } | Self::Boolean { .. } | Self::Enum { .. } => false,
        }
    }

    pub(crate) fn item_kind(&self) -> Option<&str> {
        match self {
            Self::Array { value, .. } => Some(value),
            _ => None,
        }
    }
}

fn item_type(name: &str) -> Type {
    match name {
        "number" => Type::Number,
        "string" => Type::String,
        "boolean" => Type::Boolean,
        _ => Type::Value,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/function/property.rs"]
mod tests;

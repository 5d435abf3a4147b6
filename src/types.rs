//! Structural type system for style expressions.

use std::fmt;

/// Static type of an expression or runtime type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The type of `null`.
    Null,
    /// 64-bit float.
    Number,
    /// UTF-8 string.
    String,
    /// `true` / `false`.
    Boolean,
    /// RGBA color.
    Color,
    /// String-keyed mapping.
    Object,
    /// Any value; the top type.
    Value,
    /// Sequence with an item type and optional fixed length.
    Array(ArrayType),
}

/// Parameters of [`Type::Array`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    /// Item type; [`Type::Value`] when unconstrained.
    pub item: Box<Type>,
    /// Fixed length, if any.
    pub len: Option<usize>,
}

impl Type {
    /// Build an array type.
    pub fn array(item: Type, len: Option<usize>) -> Self {
        Self::Array(ArrayType {
            item: Box::new(item),
            len,
        })
    }

    /// Array of any values with no length constraint.
    pub fn any_array() -> Self {
        Self::array(Self::Value, None)
    }

    /// Canonical name, e.g. `Number` or `Array<Number, 3>`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Name of the type's kind, ignoring array parameters (`Array` for every array type).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Number => "Number",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Color => "Color",
            Self::Object => "Object",
            Self::Value => "Value",
            Self::Array(_) => "Array",
        }
    }

    /// Item type when this is an array type.
    pub fn item_type(&self) -> Option<&Type> {
        match self {
            Self::Array(a) => Some(&a.item),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(ArrayType { item, len: Some(n) }) => write!(f, "Array<{item}, {n}>"),
            Self::Array(ArrayType { item, len: None }) if **item == Type::Value => {
                write!(f, "Array")
            }
            Self::Array(ArrayType { item, len: None }) => write!(f, "Array<{item}>"),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

/// Parse a type name: a primitive name, `Array`, `Array<Item>` or `Array<Item, N>`.
///
/// Item types are parsed recursively, so `Array<Array<Number, 2>>` is accepted.
pub fn parse_type(name: &str) -> Option<Type> {
    let name = name.trim();
    let primitive = match name {
        "Null" => Some(Type::Null),
        "Number" => Some(Type::Number),
        "String" => Some(Type::String),
        "Boolean" => Some(Type::Boolean),
        "Color" => Some(Type::Color),
        "Object" => Some(Type::Object),
        "Value" => Some(Type::Value),
        "Array" => Some(Type::any_array()),
        _ => None,
    };
    if primitive.is_some() {
        return primitive;
    }

    let inner = name.strip_prefix("Array<")?.strip_suffix('>')?;
    let (item, len) = match split_top_level_comma(inner) {
        Some((item, len)) => {
            let len = len.trim();
            if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (item, Some(len.parse::<usize>().ok()?))
        }
        None => (inner, None),
    };
    Some(Type::array(parse_type(item)?, len))
}

fn split_top_level_comma(s: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    let mut split = None;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => split = Some(i),
            _ => {}
        }
    }
    split.map(|i| (&s[..i], &s[i + 1..]))
}

/// Structural subtype check: does a value of type `actual` satisfy `expected`?
///
/// `Value` accepts anything, other primitives match by name, and arrays match when their item
/// types match and their lengths agree (or either is unconstrained).
pub fn matches(expected: &Type, actual: &Type) -> bool {
    match (expected, actual) {
        (Type::Value, _) => true,
        (Type::Array(e), Type::Array(a)) => {
            matches(&e.item, &a.item)
                && match (e.len, a.len) {
                    (Some(x), Some(y)) => x == y,
                    _ => true,
                }
        }
        (Type::Array(_), _) | (_, Type::Array(_)) => false,
        (e, a) => e == a,
    }
}

/// Diagnostic for a failed [`matches`] check, `None` when the types are compatible.
pub fn check_subtype(expected: &Type, actual: &Type) -> Option<String> {
    if matches(expected, actual) {
        None
    } else {
        Some(format!("Expected {expected} but found {actual} instead."))
    }
}

#[cfg(test)]
#[path = "../tests/unit/types.rs"]
mod tests;

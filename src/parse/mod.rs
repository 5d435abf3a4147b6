//! Wire-format parsing: dispatch on the leading expression name and check the result against
//! the type its parent expects.

pub(crate) mod context;

use serde_json::Value as Json;

use crate::expression::{
    Expression, assertion::Assertion, binding, coalesce::Coalesce, compound, curve::Curve,
    literal::Literal, match_expr::Match,
};
use crate::types::{Type, matches};

pub(crate) use context::ParsingContext;

/// Parser for one node variant. Receives the whole wire array, name included, so argument
/// indices line up with diagnostic keys.
pub(crate) type ParseFn = fn(&[Json], &ParsingContext<'_>) -> Option<Expression>;

const SPECIAL_FORMS: &[(&str, ParseFn)] = &[
    ("literal", Literal::parse),
    ("coalesce", Coalesce::parse),
    ("match", Match::parse),
    ("curve", Curve::parse),
    ("let", binding::Let::parse),
    ("var", binding::Var::parse),
    ("number", Assertion::parse),
    ("string", Assertion::parse),
    ("boolean", Assertion::parse),
    ("object", Assertion::parse),
    ("array", Assertion::parse),
];

/// Parser registered for the expression name `name`.
pub(crate) fn lookup(name: &str) -> Option<ParseFn> {
    SPECIAL_FORMS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, f)| f)
        .or_else(|| compound::is_defined(name).then_some(compound::Compound::parse as ParseFn))
}

/// Parse one wire-format node in `ctx`.
///
/// Scalars are literals; arrays dispatch on their first element. When the context carries an
/// expected type the result is checked against it: an exact (sub)type passes, a more general
/// static type gets a runtime assertion, anything else is a diagnostic.
pub(crate) fn parse_expression(json: &Json, ctx: &ParsingContext<'_>) -> Option<Expression> {
    let parsed = match json {
        Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_) => {
            Literal::from_json(json, ctx)?
        }
        Json::Object(_) => {
            return ctx.error(r#"Bare objects invalid. Use ["literal", {...}] instead."#);
        }
        Json::Array(items) => {
            let Some(first) = items.first() else {
                return ctx.error(
                    r#"Expected an array with at least one element. If you wanted a literal array, use ["literal", []]."#,
                );
            };
            let Some(name) = first.as_str() else {
                return ctx.error_at(
                    &[0],
                    format!(
                        r#"Expression name must be a string, but found {} instead. If you wanted a literal array, use ["literal", [...]]."#,
                        json_type_name(first)
                    ),
                );
            };
            let Some(parser) = lookup(name) else {
                return ctx.error_at(
                    &[0],
                    format!(
                        r#"Unknown expression "{name}". If you wanted a literal array, use ["literal", [...]]."#
                    ),
                );
            };
            parser(items, ctx)?
        }
    };

    let Some(expected) = ctx.expected() else {
        return Some(parsed);
    };
    let actual = parsed.ty();
    if *actual == Type::Null || matches(expected, actual) {
        return Some(parsed);
    }
    if *expected == Type::Color && matches!(actual, Type::Value | Type::String) {
        return Some(compound::Compound::coerce_to_color(parsed));
    }
    if *expected != Type::Null && *expected != Type::Color && matches(actual, expected) {
        return Some(Assertion::wrap(expected.clone(), parsed));
    }
    ctx.error(format!("Expected {expected} but found {actual} instead."))
}

/// Short name of a JSON value's kind, for diagnostics.
pub(crate) fn json_type_name(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/dispatch.rs"]
mod tests;

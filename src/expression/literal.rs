use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::color::parse_css_color;
use crate::foundation::error::EvalResult;
use crate::parse::ParsingContext;
use crate::runtime::EvaluationContext;
use crate::types::Type;
use crate::value::{Value, number_to_json};

/// Constant value.
#[derive(Debug, Clone)]
pub struct Literal {
    key: String,
    ty: Type,
    value: Value,
}

impl Literal {
    /// `["literal", value]`.
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        if args.len() != 2 {
            return ctx.error(format!(
                "'literal' expression requires exactly one argument, but found {} instead.",
                args.len() - 1
            ));
        }
        Self::build(Value::from(&args[1]), ctx)
    }

    /// Bare scalar in expression position.
    ///
    /// A string where a color is expected must parse as a CSS color.
    pub(crate) fn from_json(json: &Json, ctx: &ParsingContext<'_>) -> Option<Expression> {
        if let (Json::String(s), Some(Type::Color)) = (json, ctx.expected()) {
            return match parse_css_color(s) {
                Some(color) => Self::build(Value::Color(color), ctx),
                None => ctx.error(format!("Could not parse color from value '{s}'")),
            };
        }
        Self::build(Value::from(json), ctx)
    }

    fn build(value: Value, ctx: &ParsingContext<'_>) -> Option<Expression> {
        if !value.is_valid() {
            return ctx.error("invalid value");
        }
        let mut ty = value.type_of();

        // An empty array takes on the expected array type so it can unify with later,
        // non-empty siblings.
        if let (Type::Array(a), Some(expected @ Type::Array(e))) = (&ty, ctx.expected()) {
            if a.len == Some(0) && matches!(e.len, None | Some(0)) {
                ty = expected.clone();
            }
        }

        Some(Expression::Literal(Self {
            key: ctx.key().to_owned(),
            ty,
            value,
        }))
    }

    /// The stored value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Node for Literal {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, _ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        Ok(self.value.clone())
    }

    fn serialize(&self) -> Json {
        match &self.value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                self.value.to_json()
            }
            Value::Color(c) => serialize_call("rgba", c.to_wire().map(number_to_json)),
            Value::Array(_) | Value::Object(_) => {
                Json::Array(vec![Json::from("literal"), self.value.to_json()])
            }
        }
    }

    fn for_each_child<'e>(&'e self, _f: &mut dyn FnMut(&'e Expression)) {}
}

#[cfg(test)]
#[path = "../../tests/unit/expression/literal.rs"]
mod tests;

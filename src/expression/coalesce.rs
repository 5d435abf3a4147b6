use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::error::EvalResult;
use crate::parse::{ParsingContext, parse_expression};
use crate::runtime::EvaluationContext;
use crate::types::Type;
use crate::value::Value;

/// `["coalesce", a, b, ...]`: the first child that evaluates to a non-null value without error.
#[derive(Debug, Clone)]
pub struct Coalesce {
    key: String,
    ty: Type,
    args: Vec<Expression>,
}

impl Coalesce {
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        let mut output_type = ctx.expected().cloned();
        let mut parsed_args = Vec::with_capacity(args.len().saturating_sub(1));
        let mut failed = false;

        for (i, arg) in args.iter().enumerate().skip(1) {
            let Some(parsed) = parse_expression(arg, &ctx.concat(i, output_type.clone())) else {
                failed = true;
                continue;
            };
            if output_type.is_none() && *parsed.ty() != Type::Null {
                output_type = Some(parsed.ty().clone());
            }
            parsed_args.push(parsed);
        }

        if failed {
            return None;
        }
        Some(Expression::Coalesce(Self {
            key: ctx.key().to_owned(),
            ty: output_type.unwrap_or(Type::Null),
            args: parsed_args,
        }))
    }

    /// Children in fallback order.
    pub fn args(&self) -> &[Expression] {
        &self.args
    }
}

impl Node for Coalesce {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    /// Errors from every child but the last are swallowed; the last child's error propagates.
    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let last = self.args.len().saturating_sub(1);
        for (i, arg) in self.args.iter().enumerate() {
            match arg.evaluate(ctx) {
                Ok(Value::Null) => {}
                Ok(v) => return Ok(v),
                Err(e) if i == last => return Err(e),
                Err(e) => {
                    tracing::trace!(key = arg.key(), error = %e, "coalesce fallback");
                }
            }
        }
        Ok(Value::Null)
    }

    fn serialize(&self) -> Json {
        serialize_call("coalesce", self.args.iter().map(Expression::serialize))
    }

    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        self.args.iter().for_each(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/coalesce.rs"]
mod tests;

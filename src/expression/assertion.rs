use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::error::EvalResult;
use crate::parse::{ParsingContext, parse_expression};
use crate::runtime::{EvaluationContext, as_type};
use crate::types::{ArrayType, Type};
use crate::value::Value;

/// `["number" | "string" | "boolean" | "object", v, ...]` and `["array", item?, N?, v]`.
///
/// Evaluates to the first input whose runtime type matches; the last input's mismatch is the
/// error. Also inserted by the parser when a `Value`-typed node meets a concrete expected type.
#[derive(Debug, Clone)]
pub struct Assertion {
    key: String,
    ty: Type,
    inputs: Vec<Expression>,
}

impl Assertion {
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        let name = args.first().and_then(Json::as_str).unwrap_or_default();
        if name == "array" {
            return Self::parse_array(args, ctx);
        }
        let ty = match name {
            "number" => Type::Number,
            "string" => Type::String,
            "boolean" => Type::Boolean,
            _ => Type::Object,
        };
        if args.len() < 2 {
            return ctx.error("Expected at least one argument.");
        }

        let mut inputs = Vec::with_capacity(args.len() - 1);
        let mut failed = false;
        for (i, arg) in args.iter().enumerate().skip(1) {
            match parse_expression(arg, &ctx.concat(i, Some(Type::Value))) {
                Some(input) => inputs.push(input),
                None => failed = true,
            }
        }
        if failed {
            return None;
        }
        Some(Expression::Assertion(Self {
            key: ctx.key().to_owned(),
            ty,
            inputs,
        }))
    }

    fn parse_array(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        if !(2..=4).contains(&args.len()) {
            return ctx.error(format!(
                "Expected 1, 2, or 3 arguments, but found {} instead.",
                args.len() - 1
            ));
        }

        let mut item = Type::Value;
        let mut len = None;
        if args.len() > 2 {
            item = match args[1].as_str() {
                Some("string") => Type::String,
                Some("number") => Type::Number,
                Some("boolean") => Type::Boolean,
                _ => {
                    return ctx.error_at(
                        &[1],
                        r#"The item type argument of "array" must be one of string, number, boolean"#,
                    );
                }
            };
        }
        if args.len() > 3 {
            match args[2].as_u64().filter(|&n| n > 0) {
                Some(n) => len = usize::try_from(n).ok(),
                None => {
                    return ctx.error_at(
                        &[2],
                        r#"The length argument to "array" must be a positive integer literal"#,
                    );
                }
            }
        }

        let input_index = args.len() - 1;
        let input = parse_expression(&args[input_index], &ctx.concat(input_index, Some(Type::Value)))?;
        Some(Expression::Assertion(Self {
            key: ctx.key().to_owned(),
            ty: Type::array(item, len),
            inputs: vec![input],
        }))
    }

    /// Assert that `input` produces `ty` at runtime.
    pub(crate) fn wrap(ty: Type, input: Expression) -> Expression {
        Expression::Assertion(Self {
            key: input.key().to_owned(),
            ty,
            inputs: vec![input],
        })
    }

    /// Candidate inputs in order.
    pub fn inputs(&self) -> &[Expression] {
        &self.inputs
    }
}

impl Node for Assertion {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let Some((last, rest)) = self.inputs.split_last() else {
            return Ok(Value::Null);
        };
        for input in rest {
            let value = input.evaluate(ctx)?;
            if as_type(&value, &self.ty).is_ok() {
                return Ok(value);
            }
        }
        let value = last.evaluate(ctx)?;
        as_type(&value, &self.ty)?;
        Ok(value)
    }

    fn serialize(&self) -> Json {
        let inputs = self.inputs.iter().map(Expression::serialize);
        match &self.ty {
            Type::Array(ArrayType { item, len }) => {
                let mut args = Vec::with_capacity(3);
                if **item != Type::Value || len.is_some() {
                    args.push(Json::from(item.kind_name().to_ascii_lowercase()));
                }
                if let Some(n) = len {
                    args.push(Json::from(*n));
                }
                args.extend(inputs);
                serialize_call("array", args)
            }
            ty => serialize_call(&ty.kind_name().to_ascii_lowercase(), inputs),
        }
    }

    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        self.inputs.iter().for_each(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/assertion.rs"]
mod tests;

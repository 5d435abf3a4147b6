use std::sync::Arc;

use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::error::EvalResult;
use crate::parse::{ParsingContext, parse_expression};
use crate::runtime::EvaluationContext;
use crate::types::Type;
use crate::value::Value;

/// `["let", name, value, ..., body]`: evaluates `body` with the named values in scope.
///
/// Binding values are parsed and evaluated in the enclosing scope; they do not see each other.
#[derive(Debug, Clone)]
pub struct Let {
    key: String,
    bindings: Vec<(Arc<str>, Expression)>,
    result: Box<Expression>,
}

impl Let {
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        if args.len() < 4 {
            return ctx.error(format!(
                "Expected at least 3 arguments, but found {} instead.",
                args.len() - 1
            ));
        }
        if args.len() % 2 != 0 {
            return ctx.error("Expected an odd number of arguments.");
        }

        let mut bindings = Vec::with_capacity((args.len() - 2) / 2);
        let mut failed = false;
        for i in (1..args.len() - 1).step_by(2) {
            let Some(name) = args[i].as_str().filter(|n| is_identifier(n)) else {
                ctx.error_at::<()>(
                    &[i],
                    format!(
                        "Variable names must contain only alphanumeric characters or '_', and may not start with a digit; found {}.",
                        args[i]
                    ),
                );
                failed = true;
                continue;
            };
            match parse_expression(&args[i + 1], &ctx.concat(i + 1, None)) {
                Some(value) => bindings.push((Arc::<str>::from(name), value)),
                None => failed = true,
            }
        }
        if failed {
            return None;
        }

        let scope = bindings
            .iter()
            .map(|(name, value)| (Arc::clone(name), value.ty().clone()))
            .collect();
        let body_index = args.len() - 1;
        let result = parse_expression(
            &args[body_index],
            &ctx.concat_scoped(body_index, ctx.expected().cloned(), scope),
        )?;

        Some(Expression::Let(Self {
            key: ctx.key().to_owned(),
            bindings,
            result: Box::new(result),
        }))
    }

    /// The body evaluated with the bindings in scope.
    pub fn result(&self) -> &Expression {
        &self.result
    }

    /// `(name, value)` bindings in source order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.bindings.iter().map(|(n, e)| (&**n, e))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Node for Let {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        self.result.ty()
    }

    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let values = self
            .bindings
            .iter()
            .map(|(_, e)| e.evaluate(ctx))
            .collect::<EvalResult<Vec<_>>>()?;

        let mark = ctx.scope_len();
        for ((name, _), value) in self.bindings.iter().zip(values) {
            ctx.bind(Arc::clone(name), value);
        }
        let result = self.result.evaluate(ctx);
        ctx.unbind_to(mark);
        result
    }

    fn serialize(&self) -> Json {
        let mut args = Vec::with_capacity(self.bindings.len() * 2 + 1);
        for (name, value) in &self.bindings {
            args.push(Json::from(&**name));
            args.push(value.serialize());
        }
        args.push(self.result.serialize());
        serialize_call("let", args)
    }

    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        for (_, value) in &self.bindings {
            f(value);
        }
        f(&self.result);
    }
}

/// `["var", name]`.
#[derive(Debug, Clone)]
pub struct Var {
    key: String,
    ty: Type,
    name: Arc<str>,
}

impl Var {
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        let [_, name] = args else {
            return ctx.error(format!(
                "'var' expression requires exactly one string literal argument, but found {} instead.",
                args.len() - 1
            ));
        };
        let Some(name) = name.as_str() else {
            return ctx.error_at(&[1], "'var' expression requires a string literal argument.");
        };
        let Some(ty) = ctx.lookup_var(name) else {
            return ctx.error_at(
                &[1],
                format!(
                    r#"Unknown variable "{name}". Make sure "{name}" has been bound in an enclosing "let" expression before using it."#
                ),
            );
        };
        Some(Expression::Var(Self {
            key: ctx.key().to_owned(),
            ty,
            name: Arc::from(name),
        }))
    }

    /// Name of the referenced binding.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Var {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        ctx.lookup(&self.name)
    }

    fn serialize(&self) -> Json {
        serialize_call("var", [Json::from(&*self.name)])
    }

    fn for_each_child<'e>(&'e self, _f: &mut dyn FnMut(&'e Expression)) {}
}

#[cfg(test)]
#[path = "../../tests/unit/expression/binding.rs"]
mod tests;

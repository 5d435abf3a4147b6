use std::collections::HashMap;

use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::error::EvalResult;
use crate::parse::{ParsingContext, parse_expression};
use crate::runtime::{EvaluationContext, as_type, to_string};
use crate::types::Type;
use crate::value::{MAX_SAFE_INTEGER, Value, format_number};

/// A branch label as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Integral numeric label.
    Number(f64),
    /// String label.
    String(String),
}

impl Label {
    fn stringify(&self) -> String {
        match self {
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
        }
    }

    fn ty(&self) -> Type {
        match self {
            Self::Number(_) => Type::Number,
            Self::String(_) => Type::String,
        }
    }

    fn to_json(&self) -> Json {
        match self {
            Self::Number(n) => crate::value::number_to_json(*n),
            Self::String(s) => Json::from(s.as_str()),
        }
    }
}

/// `["match", input, labels, output, ..., otherwise]`.
#[derive(Debug, Clone)]
pub struct Match {
    key: String,
    ty: Type,
    input_type: Type,
    input: Box<Expression>,
    cases: HashMap<String, usize>,
    labels: Vec<Vec<Label>>,
    outputs: Vec<Expression>,
    otherwise: Box<Expression>,
}

impl Match {
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        if args.len() < 5 {
            return ctx.error(format!(
                "Expected at least 4 arguments, but found only {}.",
                args.len() - 1
            ));
        }
        if args.len() % 2 != 1 {
            return ctx.error("Expected an even number of arguments.");
        }

        let mut input_type: Option<Type> = None;
        let mut output_type = ctx.expected().cloned();
        let mut cases = HashMap::new();
        let mut labels = Vec::new();
        let mut outputs = Vec::new();
        let mut failed = false;

        for i in (2..args.len() - 1).step_by(2) {
            let branch_labels = match &args[i] {
                Json::Array(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            if branch_labels.is_empty() {
                ctx.error_at::<()>(&[i], "Expected at least one branch label.");
                failed = true;
                continue;
            }

            let mut parsed_labels = Vec::with_capacity(branch_labels.len());
            for raw in branch_labels {
                let Some(label) = parse_label(raw, i, ctx) else {
                    failed = true;
                    continue;
                };
                let ty = label.ty();
                match &input_type {
                    None => input_type = Some(ty),
                    Some(expected) if *expected != ty => {
                        ctx.error_at::<()>(
                            &[i],
                            format!("Expected {expected} but found {ty} instead."),
                        );
                        failed = true;
                        continue;
                    }
                    Some(_) => {}
                }
                let key = label.stringify();
                if cases.contains_key(&key) {
                    ctx.error_at::<()>(&[i], "Branch labels must be unique.");
                    failed = true;
                    continue;
                }
                cases.insert(key, outputs.len());
                parsed_labels.push(label);
            }

            match parse_expression(&args[i + 1], &ctx.concat(i + 1, output_type.clone())) {
                Some(result) => {
                    if output_type.is_none() && *result.ty() != Type::Null {
                        output_type = Some(result.ty().clone());
                    }
                    labels.push(parsed_labels);
                    outputs.push(result);
                }
                None => failed = true,
            }
        }

        let input = parse_expression(&args[1], &ctx.concat(1, input_type.clone()));
        let otherwise_index = args.len() - 1;
        let otherwise = parse_expression(
            &args[otherwise_index],
            &ctx.concat(otherwise_index, output_type.clone()),
        );

        let (Some(input), Some(otherwise), Some(input_type), false) =
            (input, otherwise, input_type, failed)
        else {
            return None;
        };

        Some(Expression::Match(Self {
            key: ctx.key().to_owned(),
            ty: output_type.unwrap_or_else(|| otherwise.ty().clone()),
            input_type,
            input: Box::new(input),
            cases,
            labels,
            outputs,
            otherwise: Box::new(otherwise),
        }))
    }

    /// Input expression.
    pub fn input(&self) -> &Expression {
        &self.input
    }

    /// Primitive type shared by all labels.
    pub fn input_type(&self) -> &Type {
        &self.input_type
    }

    /// Output index for a stringified label.
    pub fn case(&self, label: &str) -> Option<usize> {
        self.cases.get(label).copied()
    }

    /// Branch outputs, indexed by [`Self::case`].
    pub fn outputs(&self) -> &[Expression] {
        &self.outputs
    }

    /// The default branch.
    pub fn otherwise(&self) -> &Expression {
        &self.otherwise
    }
}

fn parse_label(raw: &Json, index: usize, ctx: &ParsingContext<'_>) -> Option<Label> {
    match raw {
        Json::String(s) => Some(Label::String(s.clone())),
        Json::Number(n) => {
            let n = n.as_f64()?;
            if n.abs() > MAX_SAFE_INTEGER {
                return ctx.error_at(
                    &[index],
                    format!(
                        "Overflow: numeric branch labels must be no larger than {}.",
                        format_number(MAX_SAFE_INTEGER)
                    ),
                );
            }
            if n.fract() != 0.0 {
                return ctx.error_at(&[index], "Numeric branch labels must be integer values.");
            }
            Some(Label::Number(n))
        }
        _ => ctx.error_at(&[index], "Branch labels must be numbers or strings."),
    }
}

impl Node for Match {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    /// Only the selected branch is evaluated.
    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let input = self.input.evaluate(ctx)?;
        let label = to_string(as_type(&input, &self.input_type)?)?;
        match self.cases.get(&label) {
            Some(&i) => self.outputs[i].evaluate(ctx),
            None => self.otherwise.evaluate(ctx),
        }
    }

    /// Branches sharing an output are grouped under one label list.
    fn serialize(&self) -> Json {
        let mut args = vec![self.input.serialize()];
        for (labels, output) in self.labels.iter().zip(&self.outputs) {
            args.push(Json::Array(labels.iter().map(Label::to_json).collect()));
            args.push(output.serialize());
        }
        args.push(self.otherwise.serialize());
        serialize_call("match", args)
    }

    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        f(&self.input);
        self.outputs.iter().for_each(&mut *f);
        f(&self.otherwise);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/match_expr.rs"]
mod tests;

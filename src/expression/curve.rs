use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::error::EvalResult;
use crate::parse::{ParsingContext, json_type_name, parse_expression};
use crate::runtime::curve::evaluate_curve;
use crate::runtime::{EvaluationContext, Interpolation, as_type};
use crate::types::Type;
use crate::value::{MAX_SAFE_INTEGER, Value, format_number, number_to_json};

/// `["curve", interpolation, input, label, output, ...]`.
#[derive(Debug, Clone)]
pub struct Curve {
    key: String,
    ty: Type,
    interpolation: Interpolation,
    input: Box<Expression>,
    labels: Vec<f64>,
    outputs: Vec<Expression>,
}

impl Curve {
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

        let interpolation = parse_interpolation(&args[1], ctx);
        let input = parse_expression(&args[2], &ctx.concat(2, Some(Type::Number)));

        let mut output_type = ctx.expected().cloned();
        let mut labels: Vec<f64> = Vec::with_capacity((args.len() - 3) / 2);
        let mut outputs = Vec::with_capacity((args.len() - 3) / 2);
        let mut failed = false;

        for i in (3..args.len()).step_by(2) {
            let Some(label) = args[i].as_f64() else {
                ctx.error_at::<()>(
                    &[i],
                    format!(
                        r#"Input/output pairs for "curve" expressions must be defined using literal numeric values (not computed expressions) for the input values, but found {} instead."#,
                        json_type_name(&args[i])
                    ),
                );
                failed = true;
                continue;
            };
            if label.abs() > MAX_SAFE_INTEGER {
                ctx.error_at::<()>(
                    &[i],
                    format!(
                        "Numeric values must be no larger than {}.",
                        format_number(MAX_SAFE_INTEGER)
                    ),
                );
                failed = true;
                continue;
            }
            if labels.last().is_some_and(|&prev| prev >= label) {
                ctx.error_at::<()>(
                    &[i],
                    r#"Input/output pairs for "curve" expressions must be arranged with input values in strictly ascending order."#,
                );
                failed = true;
                continue;
            }

            match parse_expression(&args[i + 1], &ctx.concat(i + 1, output_type.clone())) {
                Some(parsed) => {
                    if output_type.is_none() && *parsed.ty() != Type::Null {
                        output_type = Some(parsed.ty().clone());
                    }
                    labels.push(label);
                    outputs.push(parsed);
                }
                None => failed = true,
            }
        }

        let (Some(interpolation), Some(input), false) = (interpolation, input, failed) else {
            return None;
        };
        let output_type = output_type.unwrap_or(Type::Null);

        if interpolation != Interpolation::Step && !ctx.interpolators().supports(&output_type) {
            return ctx.error(format!(
                "Type {output_type} is not interpolatable, and thus cannot be used as a {} curve's output type.",
                interpolation.name()
            ));
        }

        Some(Expression::Curve(Self {
            key: ctx.key().to_owned(),
            ty: output_type,
            interpolation,
            input: Box::new(input),
            labels,
            outputs,
        }))
    }

    /// How adjacent stops are blended.
    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }

    /// Input expression.
    pub fn input(&self) -> &Expression {
        &self.input
    }

    /// Stop labels in strictly ascending order.
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// `(label, output)` stops in ascending label order.
    pub fn stops(&self) -> impl Iterator<Item = (f64, &Expression)> {
        self.labels.iter().copied().zip(&self.outputs)
    }
}

fn parse_interpolation(raw: &Json, ctx: &ParsingContext<'_>) -> Option<Interpolation> {
    let Some(items) = raw.as_array().filter(|items| !items.is_empty()) else {
        return ctx.error_at(&[1], "Expected an interpolation type expression.");
    };
    match items[0].as_str() {
        Some("step") => Some(Interpolation::Step),
        Some("linear") => Some(Interpolation::Linear),
        Some("exponential") => match items.get(1).and_then(Json::as_f64) {
            Some(base) => Some(Interpolation::Exponential { base }),
            None => ctx.error_at(&[1, 1], "Exponential interpolation requires a numeric base."),
        },
        Some("cubic-bezier") => {
            let points: Vec<f64> = items[1..]
                .iter()
                .filter_map(Json::as_f64)
                .filter(|p| (0.0..=1.0).contains(p))
                .collect();
            match <[f64; 4]>::try_from(points) {
                Ok(control_points) if items.len() == 5 => {
                    Some(Interpolation::CubicBezier { control_points })
                }
                _ => ctx.error_at(
                    &[1],
                    "Cubic bezier interpolation requires four numeric arguments with values between 0 and 1.",
                ),
            }
        }
        _ => ctx.error_at(
            &[1, 0],
            format!("Unknown interpolation type {}", items[0]),
        ),
    }
}

impl Node for Curve {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let input = self.input.evaluate(ctx)?;
        let input = as_type(&input, &Type::Number)?
            .as_f64()
            .unwrap_or(f64::NAN);
        let runtime = ctx.runtime();
        evaluate_curve(
            runtime,
            input,
            &self.labels,
            &self.interpolation,
            &self.ty,
            |i| self.outputs[i].evaluate(ctx),
        )
    }

    fn serialize(&self) -> Json {
        let mut args = vec![self.interpolation.to_json(), self.input.serialize()];
        for (label, output) in self.stops() {
            args.push(number_to_json(label));
            args.push(output.serialize());
        }
        serialize_call("curve", args)
    }

    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        f(&self.input);
        self.outputs.iter().for_each(&mut *f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/curve.rs"]
mod tests;

use std::cell::RefCell;
use std::sync::Arc;

use serde_json::Value as Json;

use crate::expression::Expression;
use crate::foundation::error::{EvalResult, ParseErrors};
use crate::parse::{ParsingContext, parse_expression};
use crate::runtime::{EvaluationContext, Interpolators, Runtime};
use crate::types::Type;
use crate::value::{Properties, Value};

/// Knobs for [`compile_expression_with`].
#[derive(Debug, Default, Clone)]
pub struct CompileOptions {
    /// Interpolators available to non-step curves. Curve outputs whose type has no registered
    /// interpolator are rejected at parse time.
    pub interpolators: Interpolators,
}

/// A parsed, type-checked expression ready for repeated evaluation.
///
/// Evaluation goes through `&self` and allocates a fresh context per call, so one compiled
/// expression can be shared across threads.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    expression: Expression,
    is_feature_constant: bool,
    is_zoom_constant: bool,
    runtime: Arc<Runtime>,
}

impl CompiledExpression {
    /// Root node of the parsed tree.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Static result type.
    pub fn ty(&self) -> &Type {
        self.expression.ty()
    }

    /// True when no node reads feature properties.
    pub fn is_feature_constant(&self) -> bool {
        self.is_feature_constant
    }

    /// True when no node reads the zoom level.
    pub fn is_zoom_constant(&self) -> bool {
        self.is_zoom_constant
    }

    /// Shared evaluation state (bezier cache and interpolators).
    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    /// Evaluate at `zoom` against a feature's `properties`.
    pub fn evaluate(&self, zoom: f64, properties: &Properties) -> EvalResult<Value> {
        let mut ctx = EvaluationContext::new(zoom, properties, &self.runtime);
        self.expression.evaluate(&mut ctx)
    }

    /// Wire form of the compiled tree.
    pub fn serialize(&self) -> Json {
        self.expression.serialize()
    }

    pub(crate) fn with_runtime(expression: Expression, runtime: Arc<Runtime>) -> Self {
        let mut is_feature_constant = true;
        let mut is_zoom_constant = true;
        expression.visit(&mut |node| {
            if let Expression::Compound(c) = node {
                is_feature_constant &= !c.reads_feature();
                is_zoom_constant &= !c.reads_zoom();
            }
        });
        Self {
            expression,
            is_feature_constant,
            is_zoom_constant,
            runtime,
        }
    }
}

/// Parse and type-check `json`, optionally against an `expected` result type, with the default
/// interpolators.
pub fn compile_expression(
    json: &Json,
    expected: Option<Type>,
) -> Result<CompiledExpression, ParseErrors> {
    compile_expression_with(json, expected, CompileOptions::default())
}

/// [`compile_expression`] with explicit options.
///
/// Every diagnostic found is reported, not just the first.
#[tracing::instrument(skip(json, options))]
pub fn compile_expression_with(
    json: &Json,
    expected: Option<Type>,
    options: CompileOptions,
) -> Result<CompiledExpression, ParseErrors> {
    let errors = RefCell::new(Vec::new());
    let parsed = {
        let ctx = ParsingContext::new(&errors, &options.interpolators, expected);
        parse_expression(json, &ctx)
    };
    let errors = errors.into_inner();

    match parsed {
        Some(expression) if errors.is_empty() => {
            let runtime = Arc::new(Runtime::with_interpolators(options.interpolators));
            Ok(CompiledExpression::with_runtime(expression, runtime))
        }
        _ => {
            tracing::warn!(count = errors.len(), "expression failed to compile");
            Err(ParseErrors { errors })
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/compile.rs"]
mod tests;

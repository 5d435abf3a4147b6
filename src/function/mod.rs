//! Style functions: property definitions (constants, legacy stop functions or expressions)
//! compiled into callables of `(zoom, properties)`.

pub(crate) mod convert;
pub(crate) mod property;

use serde_json::{Value as Json, json};

use crate::compile::{CompileOptions, CompiledExpression, compile_expression_with};
use crate::expression::{Curve, Expression, Node};
use crate::foundation::error::{EvalResult, ParseError, StyleError, StyleResult};
use crate::types::Type;
use crate::value::{Properties, Value};

pub use convert::{LegacyFunction, LegacyKind};
pub use property::PropertySpec;

/// Whether `definition` is a function (expression or legacy) rather than a constant.
pub fn is_function_definition(definition: &Json) -> bool {
    let Some(map) = definition.as_object() else {
        return false;
    };
    let truthy = |key: &str| {
        map.get(key)
            .is_some_and(|v| !matches!(v, Json::Null | Json::Bool(false)))
    };
    truthy("expression") || truthy("stops") || map.get("type") == Some(&json!("identity"))
}

#[derive(Debug, Clone)]
struct ZoomCurve {
    stops: Vec<f64>,
    interpolation_t: CompiledExpression,
}

/// A compiled style property.
#[derive(Debug, Clone)]
pub struct StyleFunction {
    compiled: CompiledExpression,
    zoom_curve: Option<ZoomCurve>,
}

impl StyleFunction {
    /// Evaluate at `zoom` for a feature. A null result is `None`.
    pub fn evaluate(&self, zoom: f64, properties: &Properties) -> EvalResult<Option<Value>> {
        match self.compiled.evaluate(zoom, properties)? {
            Value::Null => Ok(None),
            v => Ok(Some(v)),
        }
    }

    /// True when the result does not depend on feature properties.
    pub fn is_feature_constant(&self) -> bool {
        self.compiled.is_feature_constant()
    }

    /// True when the result does not depend on zoom.
    pub fn is_zoom_constant(&self) -> bool {
        self.compiled.is_zoom_constant()
    }

    /// Zoom levels of the top-level zoom curve; `None` for zoom-constant functions.
    pub fn zoom_stops(&self) -> Option<&[f64]> {
        self.zoom_curve.as_ref().map(|c| c.stops.as_slice())
    }

    /// Position of `zoom` along the zoom curve, as stop index plus the interpolation fraction
    /// toward the next stop. `None` for zoom-constant functions.
    pub fn interpolation_t(&self, zoom: f64) -> EvalResult<Option<f64>> {
        let Some(curve) = &self.zoom_curve else {
            return Ok(None);
        };
        let t = curve.interpolation_t.evaluate(zoom, &Properties::new())?;
        Ok(t.as_f64())
    }

    /// The compiled property expression.
    pub fn compiled(&self) -> &CompiledExpression {
        &self.compiled
    }
}

/// Build a [`StyleFunction`] for a property described by `spec`.
pub fn create_function(definition: &Json, spec: &PropertySpec) -> StyleResult<StyleFunction> {
    create_function_with(definition, spec, CompileOptions::default())
}

/// [`create_function`] with explicit compile options.
#[tracing::instrument(skip_all)]
pub fn create_function_with(
    definition: &Json,
    spec: &PropertySpec,
    options: CompileOptions,
) -> StyleResult<StyleFunction> {
    let expr = if !is_function_definition(definition) {
        convert::value(definition, spec)
    } else if let Some(expression) = definition.get("expression") {
        let default = spec
            .default_value()
            .map_or(Json::Null, |d| convert::value(d, spec));
        json!(["coalesce", expression, default])
    } else {
        let legacy: LegacyFunction = serde_json::from_value(definition.clone())?;
        convert::function(&legacy, spec)?
    };

    let compiled = compile_expression_with(&expr, Some(spec.expected_type()), options.clone())
        .inspect_err(|errors| tracing::warn!(%errors, "style function failed to compile"))?;

    let zoom_curve = if compiled.is_zoom_constant() {
        None
    } else {
        let curve = find_zoom_curve(compiled.expression())?
            .ok_or_else(|| StyleError::config("Invalid zoom expression"))?;
        Some(zoom_curve_metadata(curve, options)?)
    };

    Ok(StyleFunction {
        compiled,
        zoom_curve,
    })
}

fn zoom_curve_metadata(curve: &Curve, options: CompileOptions) -> StyleResult<ZoomCurve> {
    let stops = curve.labels().to_vec();
    tracing::debug!(?stops, key = curve.key(), "zoom curve located");

    let mut interp = vec![
        json!("curve"),
        curve.interpolation().to_json(),
        json!(["zoom"]),
    ];
    for (i, &zoom) in stops.iter().enumerate() {
        interp.push(json!(zoom));
        interp.push(json!(i));
    }
    let interpolation_t =
        compile_expression_with(&json!(["coalesce", interp, 0]), Some(Type::Number), options)?;

    Ok(ZoomCurve {
        stops,
        interpolation_t,
    })
}

/// Locate the zoom curve of a zoom-dependent expression.
///
/// Only a curve whose input is `["zoom"]` counts, and only at the top level or nested in
/// `coalesce` and `let` bodies. More than one candidate is an error.
pub fn find_zoom_curve(expression: &Expression) -> StyleResult<Option<&Curve>> {
    match expression {
        Expression::Curve(curve) => Ok(curve.input().is_compound("zoom").then_some(curve)),
        Expression::Let(binding) => find_zoom_curve(binding.result()),
        Expression::Coalesce(coalesce) => {
            let mut found = None;
            for arg in coalesce.args() {
                match find_zoom_curve(arg)? {
                    None => {}
                    Some(curve) if found.is_none() => found = Some(curve),
                    Some(curve) => {
                        return Err(StyleError::config(
                            ParseError::new(
                                curve.key(),
                                "Only one zoom-based curve may be used in a style function.",
                            )
                            .to_string(),
                        ));
                    }
                }
            }
            Ok(found)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/function/mod.rs"]
mod tests;

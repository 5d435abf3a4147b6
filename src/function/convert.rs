//! Rewrites constant values and legacy stop-based functions into the expression wire format.

use serde_json::{Value as Json, json};

use crate::foundation::color::parse_css_color;
use crate::foundation::error::{StyleError, StyleResult};
use crate::function::property::PropertySpec;
use crate::value::number_to_json;

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Legacy function kind.
pub enum LegacyKind {
    /// Feature property passed through unchanged.
    Identity,
    /// Exponential interpolation between stops.
    Exponential,
    /// Step function: the output of the last stop at or below the input.
    Interval,
    /// Exact-match lookup.
    Categorical,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
/// Legacy `{type, property, base, stops, default}` property function.
pub struct LegacyFunction {
    /// Function kind; inferred from the property type when absent.
    #[serde(rename = "type", default)]
    pub kind: Option<LegacyKind>,
    /// Feature property the function reads; a zoom function when absent.
    #[serde(default)]
    pub property: Option<String>,
    /// Exponential base.
    #[serde(default)]
    pub base: Option<f64>,
    /// `[input, output]` pairs. Inputs are `{zoom, value}` objects for zoom-and-property
    /// functions.
    #[serde(default)]
    pub stops: Vec<(Json, Json)>,
    /// Output when the property is missing or has the wrong type.
    #[serde(default)]
    pub default: Option<Json>,
}

/// Wire form of a constant property value.
///
/// Color strings become `["rgba", ...]`, arrays become `["literal", [...]]`.
pub fn value(raw: &Json, spec: &PropertySpec) -> Json {
    match (raw, spec) {
        (Json::String(s), PropertySpec::Color { .. }) => match parse_css_color(s) {
            Some(color) => {
                let mut out = vec![json!("rgba")];
                out.extend(color.to_wire().map(number_to_json));
                Json::Array(out)
            }
            None => raw.clone(),
        },
        (Json::Array(_) | Json::Object(_), _) => json!(["literal", raw]),
        _ => raw.clone(),
    }
}

/// Expression equivalent to a legacy function, wrapped in a `coalesce` with its default.
pub fn function(def: &LegacyFunction, spec: &PropertySpec) -> StyleResult<Json> {
    let kind = def.kind.unwrap_or(if spec.is_interpolatable() {
        LegacyKind::Exponential
    } else {
        LegacyKind::Interval
    });
    let default = def
        .default
        .as_ref()
        .or(spec.default_value())
        .map_or(Json::Null, |d| value(d, spec));

    let is_zoom_and_property =
        def.property.is_some() && def.stops.first().is_some_and(|(input, _)| input.is_object());

    let expr = match (&def.property, kind) {
        (None, LegacyKind::Identity) => {
            return Err(StyleError::config(
                "Identity functions require a \"property\" to read.",
            ));
        }
        (None, _) => zoom_curve(kind, def.base, &convert_stops(&def.stops, spec)),
        (Some(_), _) if is_zoom_and_property => zoom_and_property(def, kind, spec, &default)?,
        (Some(property), _) => property_expression(property, kind, def.base, &def.stops, spec, &default),
    };
    Ok(json!(["coalesce", expr, default]))
}

fn convert_stops(stops: &[(Json, Json)], spec: &PropertySpec) -> Vec<(Json, Json)> {
    stops
        .iter()
        .map(|(input, output)| (input.clone(), value(output, spec)))
        .collect()
}

fn interpolation(kind: LegacyKind, base: Option<f64>) -> Json {
    match kind {
        LegacyKind::Exponential => json!(["exponential", number_to_json(base.unwrap_or(1.0))]),
        LegacyKind::Identity | LegacyKind::Interval | LegacyKind::Categorical => json!(["step"]),
    }
}

fn curve(interp: Json, input: Json, stops: &[(Json, Json)]) -> Json {
    let mut out = vec![json!("curve"), interp, input];
    for (label, output) in stops {
        out.push(label.clone());
        out.push(output.clone());
    }
    Json::Array(out)
}

fn zoom_curve(kind: LegacyKind, base: Option<f64>, stops: &[(Json, Json)]) -> Json {
    curve(interpolation(kind, base), json!(["zoom"]), stops)
}

fn property_expression(
    property: &str,
    kind: LegacyKind,
    base: Option<f64>,
    stops: &[(Json, Json)],
    spec: &PropertySpec,
    default: &Json,
) -> Json {
    let lookup = json!(["get", property]);
    match kind {
        LegacyKind::Identity => typed_lookup(lookup, spec),
        LegacyKind::Exponential | LegacyKind::Interval => curve(
            interpolation(kind, base),
            json!(["number", lookup]),
            &convert_stops(stops, spec),
        ),
        LegacyKind::Categorical => {
            let mut out = vec![json!("match"), lookup];
            for (label, output) in convert_stops(stops, spec) {
                out.push(label);
                out.push(output);
            }
            out.push(default.clone());
            Json::Array(out)
        }
    }
}

fn typed_lookup(lookup: Json, spec: &PropertySpec) -> Json {
    match spec {
        PropertySpec::Number { .. } => json!(["number", lookup]),
        PropertySpec::String { .. } | PropertySpec::Enum { .. } => json!(["string", lookup]),
        PropertySpec::Boolean { .. } => json!(["boolean", lookup]),
        PropertySpec::Color { .. } => json!(["to-color", lookup]),
        PropertySpec::Array { length, .. } => {
            let mut out = vec![json!("array")];
            if let Some(item) = spec.item_kind().filter(|k| matches!(*k, "number" | "string" | "boolean")) {
                out.push(json!(item));
                if let Some(n) = length {
                    out.push(json!(n));
                }
            }
            out.push(lookup);
            Json::Array(out)
        }
    }
}

/// Stops keyed by `{zoom, value}` become a zoom curve whose outputs are property expressions,
/// one per distinct zoom level in first-seen order.
fn zoom_and_property(
    def: &LegacyFunction,
    kind: LegacyKind,
    spec: &PropertySpec,
    default: &Json,
) -> StyleResult<Json> {
    let property = def.property.as_deref().unwrap_or_default();
    let mut groups: Vec<(f64, Vec<(Json, Json)>)> = Vec::new();
    for (input, output) in &def.stops {
        let (Some(zoom), Some(label)) = (input.get("zoom").and_then(Json::as_f64), input.get("value"))
        else {
            return Err(StyleError::config(format!(
                "Zoom-and-property function stops must have numeric \"zoom\" and a \"value\"; found {input}."
            )));
        };
        let entry = (label.clone(), output.clone());
        match groups.iter_mut().find(|(z, _)| *z == zoom) {
            Some((_, stops)) => stops.push(entry),
            None => groups.push((zoom, vec![entry])),
        }
    }

    let stops: Vec<(Json, Json)> = groups
        .iter()
        .map(|(zoom, stops)| {
            (
                number_to_json(*zoom),
                property_expression(property, kind, def.base, stops, spec, default),
            )
        })
        .collect();
    Ok(zoom_curve(kind, def.base, &stops))
}

#[cfg(test)]
#[path = "../../tests/unit/function/convert.rs"]
mod tests;

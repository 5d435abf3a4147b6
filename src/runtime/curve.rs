use crate::foundation::error::EvalResult;
use crate::runtime::Runtime;
use crate::types::Type;
use crate::value::{Value, number_to_json};

/// How a curve blends between adjacent stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interpolation {
    /// Hold the lower stop's output.
    Step,
    /// Linear blend.
    Linear,
    /// Exponential blend; `base` controls how fast the output grows toward the upper stop.
    Exponential {
        /// Growth base; `1` is linear.
        base: f64,
    },
    /// Linear fraction eased by a cubic bezier with control points `[x1, y1, x2, y2]`.
    CubicBezier {
        /// Control points, each in `[0, 1]`.
        control_points: [f64; 4],
    },
}

impl Interpolation {
    /// Wire name (`step`, `linear`, `exponential`, `cubic-bezier`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Linear => "linear",
            Self::Exponential { .. } => "exponential",
            Self::CubicBezier { .. } => "cubic-bezier",
        }
    }

    /// Wire form, e.g. `["exponential", 2]`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = vec![serde_json::Value::from(self.name())];
        match self {
            Self::Exponential { base } => out.push(number_to_json(*base)),
            Self::CubicBezier { control_points } => {
                out.extend(control_points.iter().map(|&p| number_to_json(p)));
            }
            Self::Step | Self::Linear => {}
        }
        serde_json::Value::Array(out)
    }
}

/// Fraction of `input` between `lower` and `upper` for an exponential curve with `base`.
///
/// `base == 1` is the linear fraction. A zero-width interval yields `0`.
pub fn interpolation_factor(input: f64, base: f64, lower: f64, upper: f64) -> f64 {
    let difference = upper - lower;
    let progress = input - lower;
    if difference == 0.0 {
        0.0
    } else if base == 1.0 {
        progress / difference
    } else {
        (base.powf(progress) - 1.0) / (base.powf(difference) - 1.0)
    }
}

/// Index of the last label `<= input`, or `0` when every label is greater.
pub(crate) fn find_stop_less_than_or_equal(labels: &[f64], input: f64) -> usize {
    labels.partition_point(|&l| l <= input).saturating_sub(1)
}

/// Evaluate a curve at `input`.
///
/// `output(i)` lazily evaluates the output expression of stop `i`; only the one or two stops
/// bracketing `input` are evaluated. Inputs outside the label range clamp to the boundary stop.
pub(crate) fn evaluate_curve(
    runtime: &Runtime,
    input: f64,
    labels: &[f64],
    interpolation: &Interpolation,
    result_type: &Type,
    mut output: impl FnMut(usize) -> EvalResult<Value>,
) -> EvalResult<Value> {
    let n = labels.len();
    let Some(&first) = labels.first() else {
        return Ok(Value::Null);
    };
    if n == 1 || input <= first {
        return output(0);
    }
    if input >= labels[n - 1] {
        return output(n - 1);
    }

    let index = find_stop_less_than_or_equal(labels, input);
    if *interpolation == Interpolation::Step {
        return output(index);
    }

    let lower = labels[index];
    let upper = labels[index + 1];
    let t = match interpolation {
        Interpolation::Step | Interpolation::Linear => {
            interpolation_factor(input, 1.0, lower, upper)
        }
        Interpolation::Exponential { base } => interpolation_factor(input, *base, lower, upper),
        Interpolation::CubicBezier { control_points } => {
            let easing = runtime.bezier.easing(*control_points);
            easing.apply(interpolation_factor(input, 1.0, lower, upper))
        }
    };

    let output_lower = output(index)?;
    let output_upper = output(index + 1)?;
    runtime
        .interpolators
        .interpolate(result_type, &output_lower, &output_upper, t)
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/curve.rs"]
mod tests;

use std::collections::HashMap;
use std::fmt;

use crate::foundation::color::Color;
use crate::foundation::error::{EvalError, EvalResult};
use crate::types::Type;
use crate::value::Value;

/// Blend two curve outputs at fraction `t`.
pub type InterpolateFn = fn(&Value, &Value, f64) -> EvalResult<Value>;

/// Interpolators keyed by result type kind name (`Number`, `Color`, `Array`, ...).
///
/// The default registry knows numbers, colors and numeric arrays; callers may register more
/// before compiling, which also makes those types legal outputs of interpolating curves.
#[derive(Clone)]
pub struct Interpolators {
    by_name: HashMap<String, InterpolateFn>,
}

impl Default for Interpolators {
    fn default() -> Self {
        let mut this = Self::empty();
        this.register("Number", number);
        this.register("Color", color);
        this.register("Array", array);
        this
    }
}

impl fmt::Debug for Interpolators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Interpolators")
            .field("types", &names)
            .finish()
    }
}

impl Interpolators {
    /// Registry with no interpolators at all.
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// Register (or replace) the interpolator for a type kind name.
    pub fn register(&mut self, type_name: impl Into<String>, f: InterpolateFn) {
        self.by_name.insert(type_name.into(), f);
    }

    /// Whether values of `ty` can be blended. Arrays additionally require numeric items.
    pub fn supports(&self, ty: &Type) -> bool {
        if !self.by_name.contains_key(ty.kind_name()) {
            return false;
        }
        match ty {
            Type::Array(a) => *a.item == Type::Number,
            _ => true,
        }
    }

    /// Blend `a` and `b` at `t` with the interpolator registered for `ty`.
    pub fn interpolate(&self, ty: &Type, a: &Value, b: &Value, t: f64) -> EvalResult<Value> {
        let f = self.by_name.get(ty.kind_name()).ok_or_else(|| {
            EvalError::new(format!("Type {ty} is not interpolatable."))
        })?;
        f(a, b, t)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn number(a: &Value, b: &Value, t: f64) -> EvalResult<Value> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(lerp(*a, *b, t))),
        _ => Err(mismatch("Number", a, b)),
    }
}

fn color(a: &Value, b: &Value, t: f64) -> EvalResult<Value> {
    match (a, b) {
        (Value::Color(a), Value::Color(b)) => Ok(Value::Color(Color::lerp(a, b, t))),
        _ => Err(mismatch("Color", a, b)),
    }
}

fn array(a: &Value, b: &Value, t: f64) -> EvalResult<Value> {
    let (Value::Array(xs), Value::Array(ys)) = (a, b) else {
        return Err(mismatch("Array<Number>", a, b));
    };
    if xs.len() != ys.len() {
        return Err(EvalError::new(format!(
            "Cannot interpolate arrays of different lengths ({} and {}).",
            xs.len(),
            ys.len()
        )));
    }
    xs.iter()
        .zip(ys)
        .map(|(x, y)| number(x, y, t))
        .collect::<EvalResult<Vec<_>>>()
        .map(Value::Array)
}

fn mismatch(expected: &str, a: &Value, b: &Value) -> EvalError {
    EvalError::new(format!(
        "Cannot interpolate {} and {} as {expected}.",
        a.type_of(),
        b.type_of()
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/interpolate.rs"]
mod tests;

//! style-expr is a small, statically typed expression language for map style properties.
//!
//! Property values (colors, widths, visibility) are written as nested JSON arrays, parsed and
//! type-checked once, then evaluated many times as pure functions of the zoom level and a
//! feature's properties.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: wire JSON + expected [`Type`] -> typed [`Expression`] tree, or every
//!    [`ParseError`] found, each keyed by the dotted path of the offending node
//! 2. **Compile**: [`compile_expression`] -> [`CompiledExpression`] with feature/zoom constancy
//! 3. **Evaluate**: `(zoom, properties)` -> [`Value`] or an [`EvalError`]
//!
//! [`create_function`] wraps the pipeline for style properties: it accepts constants, legacy
//! stop functions and `{"expression": ...}` definitions, and extracts the zoom curve that
//! renderers use to pre-sample zoom-and-property functions.
//!
//! ```
//! use serde_json::json;
//! use style_expr::{Properties, Type, Value, compile_expression};
//!
//! let compiled = compile_expression(
//!     &json!(["curve", ["linear"], ["zoom"], 0, 0, 10, 100]),
//!     Some(Type::Number),
//! )
//! .unwrap();
//! assert_eq!(compiled.evaluate(5.0, &Properties::new()).unwrap(), Value::Number(50.0));
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod expression;
mod foundation;
mod function;
mod parse;
mod types;
mod value;

pub mod runtime;

pub use compile::{CompileOptions, CompiledExpression, compile_expression, compile_expression_with};
pub use expression::{
    Assertion, Coalesce, Compound, Curve, Expression, Let, Literal, Match, Node, Var,
};
pub use expression::match_expr::Label;
pub use foundation::color::{Color, parse_css_color};
pub use foundation::error::{
    EvalError, EvalResult, ParseError, ParseErrors, StyleError, StyleResult,
};
pub use function::{
    LegacyFunction, LegacyKind, PropertySpec, StyleFunction, create_function,
    create_function_with, find_zoom_curve, is_function_definition,
};
pub use runtime::{EvaluationContext, Interpolation, Interpolators, Runtime};
pub use types::{ArrayType, Type, check_subtype, matches, parse_type};
pub use value::{Properties, Value, properties_from_json};

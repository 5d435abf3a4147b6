//! Built-in calls resolved through a static definition table.
//!
//! A definition has one or more signatures. With a single signature the arguments are parsed
//! directly against its parameter types; with several, each is tried against a side error sink
//! and the first one that type-checks wins.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;

use serde_json::Value as Json;

use crate::expression::{Expression, Node, serialize_call};
use crate::foundation::error::{EvalError, EvalResult};
use crate::parse::{ParsingContext, parse_expression};
use crate::runtime::{
    EvaluationContext, at, get, get_property, has, parse_color, rgba, to_boolean, to_number,
    to_string, type_name,
};
use crate::types::Type;
use crate::value::Value;

type EvalFn = fn(&[Expression], &mut EvaluationContext<'_>) -> EvalResult<Value>;
type ResultFn = fn(&[Expression]) -> Type;

#[derive(Debug, Clone, Copy)]
enum Param {
    Number,
    String,
    Boolean,
    Color,
    Object,
    Array,
    Value,
}

impl Param {
    fn ty(self) -> Type {
        match self {
            Self::Number => Type::Number,
            Self::String => Type::String,
            Self::Boolean => Type::Boolean,
            Self::Color => Type::Color,
            Self::Object => Type::Object,
            Self::Array => Type::any_array(),
            Self::Value => Type::Value,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Params {
    Exact(&'static [Param]),
    /// Any number of arguments of one type, at least `.1` of them.
    Variadic(Param, usize),
}

impl Params {
    fn accepts(&self, n: usize) -> bool {
        match *self {
            Self::Exact(ps) => ps.len() == n,
            Self::Variadic(_, min) => n >= min,
        }
    }

    fn get(&self, i: usize) -> Param {
        match *self {
            Self::Exact(ps) => ps.get(i).copied().unwrap_or(Param::Value),
            Self::Variadic(p, _) => p,
        }
    }

    fn describe(&self) -> String {
        match *self {
            Self::Exact(ps) => {
                let names: Vec<String> = ps.iter().map(|p| p.ty().name()).collect();
                format!("({})", names.join(", "))
            }
            Self::Variadic(p, _) => format!("({}, ...)", p.ty()),
        }
    }

    fn arity_message(&self, found: usize) -> String {
        match *self {
            Self::Exact(ps) => format!(
                "Expected {} argument{}, but found {found} instead.",
                ps.len(),
                if ps.len() == 1 { "" } else { "s" }
            ),
            Self::Variadic(_, min) => {
                format!("Expected at least {min} arguments, but found {found} instead.")
            }
        }
    }
}

struct Signature {
    params: Params,
    eval: EvalFn,
}

struct Definition {
    name: &'static str,
    signatures: &'static [Signature],
    result: ResultFn,
}

static DEFINITIONS: &[Definition] = &[
    // Lookups.
    Definition {
        name: "zoom",
        signatures: &[Signature { params: Params::Exact(&[]), eval: eval_zoom }],
        result: number_type,
    },
    Definition {
        name: "properties",
        signatures: &[Signature { params: Params::Exact(&[]), eval: eval_properties }],
        result: object_type,
    },
    Definition {
        name: "get",
        signatures: &[
            Signature { params: Params::Exact(&[Param::String]), eval: eval_get },
            Signature { params: Params::Exact(&[Param::String, Param::Object]), eval: eval_get },
        ],
        result: value_type,
    },
    Definition {
        name: "has",
        signatures: &[
            Signature { params: Params::Exact(&[Param::String]), eval: eval_has },
            Signature { params: Params::Exact(&[Param::String, Param::Object]), eval: eval_has },
        ],
        result: boolean_type,
    },
    Definition {
        name: "at",
        signatures: &[Signature { params: Params::Exact(&[Param::Number, Param::Array]), eval: eval_at }],
        result: item_of_second,
    },
    Definition {
        name: "length",
        signatures: &[
            Signature { params: Params::Exact(&[Param::Array]), eval: eval_length },
            Signature { params: Params::Exact(&[Param::String]), eval: eval_length },
        ],
        result: number_type,
    },
    Definition {
        name: "typeof",
        signatures: &[Signature { params: Params::Exact(&[Param::Value]), eval: eval_typeof }],
        result: string_type,
    },
    // Coercions.
    Definition {
        name: "to-number",
        signatures: &[Signature { params: Params::Variadic(Param::Value, 1), eval: eval_to_number }],
        result: number_type,
    },
    Definition {
        name: "to-string",
        signatures: &[Signature { params: Params::Exact(&[Param::Value]), eval: eval_to_string }],
        result: string_type,
    },
    Definition {
        name: "to-boolean",
        signatures: &[Signature { params: Params::Exact(&[Param::Value]), eval: eval_to_boolean }],
        result: boolean_type,
    },
    Definition {
        name: "to-color",
        signatures: &[Signature { params: Params::Variadic(Param::Value, 1), eval: eval_to_color }],
        result: color_type,
    },
    Definition {
        name: "to-rgba",
        signatures: &[Signature { params: Params::Exact(&[Param::Color]), eval: eval_to_rgba }],
        result: rgba_type,
    },
    Definition {
        name: "rgb",
        signatures: &[Signature {
            params: Params::Exact(&[Param::Number, Param::Number, Param::Number]),
            eval: eval_rgba,
        }],
        result: color_type,
    },
    Definition {
        name: "rgba",
        signatures: &[Signature {
            params: Params::Exact(&[Param::Number, Param::Number, Param::Number, Param::Number]),
            eval: eval_rgba,
        }],
        result: color_type,
    },
    // Math.
    Definition {
        name: "+",
        signatures: &[Signature { params: Params::Variadic(Param::Number, 0), eval: eval_sum }],
        result: number_type,
    },
    Definition {
        name: "*",
        signatures: &[Signature { params: Params::Variadic(Param::Number, 0), eval: eval_product }],
        result: number_type,
    },
    Definition {
        name: "-",
        signatures: &[
            Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_minus },
            Signature { params: Params::Exact(&[Param::Number]), eval: eval_minus },
        ],
        result: number_type,
    },
    Definition {
        name: "/",
        signatures: &[Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_divide }],
        result: number_type,
    },
    Definition {
        name: "%",
        signatures: &[Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_remainder }],
        result: number_type,
    },
    Definition {
        name: "^",
        signatures: &[Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_power }],
        result: number_type,
    },
    // Comparison and logic.
    Definition {
        name: "==",
        signatures: &[Signature { params: Params::Exact(&[Param::Value, Param::Value]), eval: eval_eq }],
        result: boolean_type,
    },
    Definition {
        name: "!=",
        signatures: &[Signature { params: Params::Exact(&[Param::Value, Param::Value]), eval: eval_ne }],
        result: boolean_type,
    },
    Definition {
        name: "<",
        signatures: COMPARABLE_LT,
        result: boolean_type,
    },
    Definition {
        name: "<=",
        signatures: COMPARABLE_LE,
        result: boolean_type,
    },
    Definition {
        name: ">",
        signatures: COMPARABLE_GT,
        result: boolean_type,
    },
    Definition {
        name: ">=",
        signatures: COMPARABLE_GE,
        result: boolean_type,
    },
    Definition {
        name: "!",
        signatures: &[Signature { params: Params::Exact(&[Param::Boolean]), eval: eval_not }],
        result: boolean_type,
    },
    Definition {
        name: "all",
        signatures: &[Signature { params: Params::Variadic(Param::Boolean, 0), eval: eval_all }],
        result: boolean_type,
    },
    Definition {
        name: "any",
        signatures: &[Signature { params: Params::Variadic(Param::Boolean, 0), eval: eval_any }],
        result: boolean_type,
    },
    // Strings.
    Definition {
        name: "concat",
        signatures: &[Signature { params: Params::Variadic(Param::Value, 0), eval: eval_concat }],
        result: string_type,
    },
    Definition {
        name: "upcase",
        signatures: &[Signature { params: Params::Exact(&[Param::String]), eval: eval_upcase }],
        result: string_type,
    },
    Definition {
        name: "downcase",
        signatures: &[Signature { params: Params::Exact(&[Param::String]), eval: eval_downcase }],
        result: string_type,
    },
];

const COMPARABLE_LT: &[Signature] = &[
    Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_lt },
    Signature { params: Params::Exact(&[Param::String, Param::String]), eval: eval_lt },
];
const COMPARABLE_LE: &[Signature] = &[
    Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_le },
    Signature { params: Params::Exact(&[Param::String, Param::String]), eval: eval_le },
];
const COMPARABLE_GT: &[Signature] = &[
    Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_gt },
    Signature { params: Params::Exact(&[Param::String, Param::String]), eval: eval_gt },
];
const COMPARABLE_GE: &[Signature] = &[
    Signature { params: Params::Exact(&[Param::Number, Param::Number]), eval: eval_ge },
    Signature { params: Params::Exact(&[Param::String, Param::String]), eval: eval_ge },
];

fn definition(name: &str) -> Option<&'static Definition> {
    DEFINITIONS.iter().find(|d| d.name == name)
}

/// Whether `name` is a built-in call.
pub(crate) fn is_defined(name: &str) -> bool {
    definition(name).is_some()
}

/// Call of a built-in definition.
#[derive(Clone)]
pub struct Compound {
    key: String,
    name: &'static str,
    ty: Type,
    args: Vec<Expression>,
    eval: EvalFn,
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compound")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl Compound {
    pub(crate) fn parse(args: &[Json], ctx: &ParsingContext<'_>) -> Option<Expression> {
        let def = args.first().and_then(Json::as_str).and_then(definition)?;
        let raw = &args[1..];

        if let [signature] = def.signatures {
            if !signature.params.accepts(raw.len()) {
                return ctx.error(signature.params.arity_message(raw.len()));
            }
            let parsed = parse_args(raw, signature.params, ctx)?;
            return Some(Self::build(def, signature, parsed, ctx.key()));
        }

        for signature in def.signatures {
            if !signature.params.accepts(raw.len()) {
                continue;
            }
            let sink = RefCell::new(Vec::new());
            let trial = ctx.with_sink(&sink);
            let parsed = parse_args(raw, signature.params, &trial);
            if let (Some(parsed), true) = (parsed, sink.borrow().is_empty()) {
                return Some(Self::build(def, signature, parsed, ctx.key()));
            }
        }

        // No overload fits: report the argument types actually found.
        let sink = RefCell::new(Vec::new());
        let untyped = ctx.with_sink(&sink);
        let mut found = Vec::with_capacity(raw.len());
        for (i, arg) in raw.iter().enumerate() {
            if let Some(e) = parse_expression(arg, &untyped.concat(i + 1, None)) {
                found.push(e.ty().name());
            }
        }
        let sink = sink.into_inner();
        if !sink.is_empty() {
            ctx.absorb(sink);
            return None;
        }
        let expected: Vec<String> = def.signatures.iter().map(|s| s.params.describe()).collect();
        ctx.error(format!(
            "Expected arguments of type {}, but found ({}) instead.",
            expected.join(" | "),
            found.join(", ")
        ))
    }

    fn build(
        def: &'static Definition,
        signature: &'static Signature,
        args: Vec<Expression>,
        key: &str,
    ) -> Expression {
        Expression::Compound(Self {
            key: key.to_owned(),
            name: def.name,
            ty: (def.result)(&args),
            args,
            eval: signature.eval,
        })
    }

    /// `["to-color", input]` around an already parsed node.
    pub(crate) fn coerce_to_color(input: Expression) -> Expression {
        let key = input.key().to_owned();
        Expression::Compound(Self {
            key,
            name: "to-color",
            ty: Type::Color,
            args: vec![input],
            eval: eval_to_color,
        })
    }

    /// Name of the built-in.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parsed arguments.
    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    /// True when the result depends on the feature's properties.
    pub fn reads_feature(&self) -> bool {
        match self.name {
            "properties" => true,
            "get" | "has" => self.args.len() == 1,
            _ => false,
        }
    }

    /// True when the result depends on the zoom level.
    pub fn reads_zoom(&self) -> bool {
        self.name == "zoom"
    }
}

fn parse_args(raw: &[Json], params: Params, ctx: &ParsingContext<'_>) -> Option<Vec<Expression>> {
    let mut parsed = Vec::with_capacity(raw.len());
    let mut failed = false;
    for (i, arg) in raw.iter().enumerate() {
        match parse_expression(arg, &ctx.concat(i + 1, Some(params.get(i).ty()))) {
            Some(e) => parsed.push(e),
            None => failed = true,
        }
    }
    (!failed).then_some(parsed)
}

impl Node for Compound {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        (self.eval)(&self.args, ctx)
    }

    fn serialize(&self) -> Json {
        serialize_call(self.name, self.args.iter().map(Expression::serialize))
    }

    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        self.args.iter().for_each(f);
    }
}

fn number_type(_: &[Expression]) -> Type {
    Type::Number
}

fn string_type(_: &[Expression]) -> Type {
    Type::String
}

fn boolean_type(_: &[Expression]) -> Type {
    Type::Boolean
}

fn color_type(_: &[Expression]) -> Type {
    Type::Color
}

fn object_type(_: &[Expression]) -> Type {
    Type::Object
}

fn value_type(_: &[Expression]) -> Type {
    Type::Value
}

fn rgba_type(_: &[Expression]) -> Type {
    Type::array(Type::Number, Some(4))
}

fn item_of_second(args: &[Expression]) -> Type {
    args.get(1)
        .and_then(|a| a.ty().item_type())
        .cloned()
        .unwrap_or(Type::Value)
}

fn typed<T>(
    arg: &Expression,
    ctx: &mut EvaluationContext<'_>,
    expected: Type,
    extract: impl FnOnce(Value) -> Result<T, Value>,
) -> EvalResult<T> {
    extract(arg.evaluate(ctx)?).map_err(|v| {
        EvalError::new(format!(
            "Expected value to be of type {expected}, but found {} instead.",
            v.type_of()
        ))
    })
}

fn number(arg: &Expression, ctx: &mut EvaluationContext<'_>) -> EvalResult<f64> {
    typed(arg, ctx, Type::Number, |v| match v {
        Value::Number(n) => Ok(n),
        v => Err(v),
    })
}

fn string(arg: &Expression, ctx: &mut EvaluationContext<'_>) -> EvalResult<String> {
    typed(arg, ctx, Type::String, |v| match v {
        Value::String(s) => Ok(s),
        v => Err(v),
    })
}

fn boolean(arg: &Expression, ctx: &mut EvaluationContext<'_>) -> EvalResult<bool> {
    typed(arg, ctx, Type::Boolean, |v| match v {
        Value::Bool(b) => Ok(b),
        v => Err(v),
    })
}

/// `to-string` form of any value: colors as `rgba(...)`, containers as JSON.
fn stringify(value: &Value) -> EvalResult<String> {
    match value {
        Value::Color(c) => Ok(c.to_string()),
        Value::Array(_) | Value::Object(_) => Ok(value.to_json().to_string()),
        other => to_string(other),
    }
}

fn eval_zoom(_: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::Number(ctx.zoom()))
}

fn eval_properties(_: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::Object(ctx.properties().clone()))
}

fn eval_get(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let key = string(&args[0], ctx)?;
    match args.get(1) {
        Some(obj) => get(&obj.evaluate(ctx)?, &key),
        None => get_property(ctx.properties(), &key),
    }
}

fn eval_has(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let key = string(&args[0], ctx)?;
    let found = match args.get(1) {
        Some(obj) => has(&obj.evaluate(ctx)?, &key)?,
        None => ctx.properties().contains_key(&key),
    };
    Ok(Value::Bool(found))
}

fn eval_at(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let index = number(&args[0], ctx)?;
    let items = typed(&args[1], ctx, Type::any_array(), |v| match v {
        Value::Array(items) => Ok(items),
        v => Err(v),
    })?;
    at(index, &items)
}

fn eval_length(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    match args[0].evaluate(ctx)? {
        Value::Array(items) => Ok(Value::Number(items.len() as f64)),
        Value::String(s) => Ok(Value::Number(s.encode_utf16().count() as f64)),
        other => Err(EvalError::new(format!(
            "Expected value to be of type String or Array, but found {} instead.",
            other.type_of()
        ))),
    }
}

fn eval_typeof(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::String(type_name(&args[0].evaluate(ctx)?)))
}

fn eval_to_number(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let mut last = None;
    for arg in args {
        match to_number(&arg.evaluate(ctx)?) {
            Ok(n) => return Ok(Value::Number(n)),
            Err(e) => last = Some(e),
        }
    }
    Err(last.unwrap_or_else(|| EvalError::new("Could not convert to number.")))
}

fn eval_to_string(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    stringify(&args[0].evaluate(ctx)?).map(Value::String)
}

fn eval_to_boolean(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::Bool(to_boolean(&args[0].evaluate(ctx)?)))
}

fn eval_to_color(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let mut last = None;
    for arg in args {
        let value = arg.evaluate(ctx)?;
        let color = match &value {
            Value::Color(c) => Ok(*c),
            Value::String(s) => parse_color(s),
            Value::Array(items) if (3..=4).contains(&items.len()) => {
                let channels: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
                match channels.as_deref() {
                    Some(&[r, g, b]) => rgba(r, g, b, None),
                    Some(&[r, g, b, a]) => rgba(r, g, b, Some(a)),
                    _ => Err(unparseable_color(&value)),
                }
            }
            _ => Err(unparseable_color(&value)),
        };
        match color {
            Ok(c) => return Ok(Value::Color(c)),
            Err(e) => last = Some(e),
        }
    }
    Err(last.unwrap_or_else(|| unparseable_color(&Value::Null)))
}

fn unparseable_color(value: &Value) -> EvalError {
    EvalError::new(format!(
        "Could not parse color from value '{}'",
        value.to_json()
    ))
}

fn eval_to_rgba(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let color = typed(&args[0], ctx, Type::Color, |v| match v {
        Value::Color(c) => Ok(c),
        v => Err(v),
    })?;
    Ok(Value::Array(
        color.to_wire().into_iter().map(Value::Number).collect(),
    ))
}

fn eval_rgba(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let r = number(&args[0], ctx)?;
    let g = number(&args[1], ctx)?;
    let b = number(&args[2], ctx)?;
    let a = args.get(3).map(|a| number(a, ctx)).transpose()?;
    rgba(r, g, b, a).map(Value::Color)
}

fn eval_sum(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let mut sum = 0.0;
    for arg in args {
        sum += number(arg, ctx)?;
    }
    Ok(Value::Number(sum))
}

fn eval_product(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let mut product = 1.0;
    for arg in args {
        product *= number(arg, ctx)?;
    }
    Ok(Value::Number(product))
}

fn eval_minus(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let a = number(&args[0], ctx)?;
    match args.get(1) {
        Some(b) => Ok(Value::Number(a - number(b, ctx)?)),
        None => Ok(Value::Number(-a)),
    }
}

fn binary_number(
    args: &[Expression],
    ctx: &mut EvaluationContext<'_>,
    op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    let a = number(&args[0], ctx)?;
    let b = number(&args[1], ctx)?;
    Ok(Value::Number(op(a, b)))
}

fn eval_divide(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    binary_number(args, ctx, |a, b| a / b)
}

fn eval_remainder(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    binary_number(args, ctx, |a, b| a % b)
}

fn eval_power(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    binary_number(args, ctx, f64::powf)
}

fn eval_eq(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let a = args[0].evaluate(ctx)?;
    let b = args[1].evaluate(ctx)?;
    Ok(Value::Bool(a == b))
}

fn eval_ne(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let a = args[0].evaluate(ctx)?;
    let b = args[1].evaluate(ctx)?;
    Ok(Value::Bool(a != b))
}

fn compare(
    args: &[Expression],
    ctx: &mut EvaluationContext<'_>,
    accept: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    let a = args[0].evaluate(ctx)?;
    let b = args[1].evaluate(ctx)?;
    let ordering = match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => {
            return Err(EvalError::new(format!(
                "Cannot compare {} and {}.",
                a.type_of(),
                b.type_of()
            )));
        }
    };
    Ok(Value::Bool(ordering.is_some_and(accept)))
}

fn eval_lt(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    compare(args, ctx, Ordering::is_lt)
}

fn eval_le(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    compare(args, ctx, Ordering::is_le)
}

fn eval_gt(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    compare(args, ctx, Ordering::is_gt)
}

fn eval_ge(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    compare(args, ctx, Ordering::is_ge)
}

fn eval_not(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::Bool(!boolean(&args[0], ctx)?))
}

fn eval_all(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    for arg in args {
        if !boolean(arg, ctx)? {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn eval_any(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    for arg in args {
        if boolean(arg, ctx)? {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn eval_concat(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&stringify(&arg.evaluate(ctx)?)?);
    }
    Ok(Value::String(out))
}

fn eval_upcase(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::String(string(&args[0], ctx)?.to_uppercase()))
}

fn eval_downcase(args: &[Expression], ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
    Ok(Value::String(string(&args[0], ctx)?.to_lowercase()))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/compound.rs"]
mod tests;

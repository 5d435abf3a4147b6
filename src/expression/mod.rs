//! Typed expression tree.
//!
//! Every node is built (and type-checked) once by the parser and never mutated afterwards. The
//! tree is evaluated by walking it against a fresh [`EvaluationContext`] per call.

pub(crate) mod assertion;
pub(crate) mod binding;
pub(crate) mod coalesce;
pub(crate) mod compound;
pub(crate) mod curve;
pub(crate) mod literal;
pub(crate) mod match_expr;

use crate::foundation::error::EvalResult;
use crate::runtime::EvaluationContext;
use crate::types::Type;
use crate::value::Value;

pub use assertion::Assertion;
pub use binding::{Let, Var};
pub use coalesce::Coalesce;
pub use compound::Compound;
pub use curve::Curve;
pub use literal::Literal;
pub use match_expr::Match;

/// Behavior shared by every node variant.
pub trait Node {
    /// Dotted diagnostic path of the node.
    fn key(&self) -> &str;

    /// Statically resolved result type.
    fn ty(&self) -> &Type;

    /// Evaluate against `ctx`.
    fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value>;

    /// Wire-format form that parses back to an equivalent node.
    fn serialize(&self) -> serde_json::Value;

    /// Call `f` on each direct child, in argument order.
    fn for_each_child<'e>(&'e self, f: &mut dyn FnMut(&'e Expression));
}

/// A parsed, type-checked expression node.
#[derive(Debug, Clone)]
pub enum Expression {
    /// Constant value.
    Literal(Literal),
    /// First non-null, non-failing child.
    Coalesce(Coalesce),
    /// Exact-label dispatch.
    Match(Match),
    /// Interpolating lookup over ascending stops.
    Curve(Curve),
    /// Lexical bindings around a body.
    Let(Let),
    /// Reference to a `let` binding.
    Var(Var),
    /// Runtime type assertion.
    Assertion(Assertion),
    /// Call of a built-in definition (`zoom`, `get`, `+`, ...).
    Compound(Compound),
}

impl Expression {
    fn node(&self) -> &dyn Node {
        match self {
            Self::Literal(e) => e,
            Self::Coalesce(e) => e,
            Self::Match(e) => e,
            Self::Curve(e) => e,
            Self::Let(e) => e,
            Self::Var(e) => e,
            Self::Assertion(e) => e,
            Self::Compound(e) => e,
        }
    }

    /// Dotted diagnostic path of the node.
    pub fn key(&self) -> &str {
        self.node().key()
    }

    /// Statically resolved result type.
    pub fn ty(&self) -> &Type {
        self.node().ty()
    }

    /// Evaluate against `ctx`.
    pub fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        self.node().evaluate(ctx)
    }

    /// Wire-format form.
    pub fn serialize(&self) -> serde_json::Value {
        self.node().serialize()
    }

    /// Pre-order walk over this node and all descendants.
    pub fn visit<'e>(&'e self, f: &mut dyn FnMut(&'e Expression)) {
        f(self);
        self.node().for_each_child(&mut |child| child.visit(f));
    }

    /// True when this node is a call of the built-in `name`.
    pub fn is_compound(&self, name: &str) -> bool {
        matches!(self, Self::Compound(c) if c.name() == name)
    }
}

pub(crate) fn serialize_call(
    name: &str,
    args: impl IntoIterator<Item = serde_json::Value>,
) -> serde_json::Value {
    let mut out = vec![serde_json::Value::from(name)];
    out.extend(args);
    serde_json::Value::Array(out)
}

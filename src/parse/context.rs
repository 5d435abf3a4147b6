use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::foundation::error::ParseError;
use crate::runtime::Interpolators;
use crate::types::Type;

/// Lexical bindings introduced by `let`, innermost last.
#[derive(Debug, Default)]
struct Scope {
    parent: Option<Rc<Scope>>,
    bindings: Vec<(Arc<str>, Type)>,
}

impl Scope {
    fn get(&self, name: &str) -> Option<&Type> {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| &**n == name)
            .map(|(_, t)| t)
            .or_else(|| self.parent.as_deref().and_then(|p| p.get(name)))
    }
}

/// Compile-time state for parsing one node: where it sits, what type its parent expects, which
/// variables are in scope, and where diagnostics go.
///
/// Child contexts share the error sink with their parent, so every diagnostic of a compile
/// attempt ends up in one list.
pub(crate) struct ParsingContext<'a> {
    key: String,
    expected: Option<Type>,
    scope: Rc<Scope>,
    errors: &'a RefCell<Vec<ParseError>>,
    interpolators: &'a Interpolators,
}

impl<'a> ParsingContext<'a> {
    pub(crate) fn new(
        errors: &'a RefCell<Vec<ParseError>>,
        interpolators: &'a Interpolators,
        expected: Option<Type>,
    ) -> Self {
        Self {
            key: String::new(),
            expected,
            scope: Rc::new(Scope::default()),
            errors,
            interpolators,
        }
    }

    /// Dotted path of this node, empty at the root.
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Type the parent expects this node to produce, if any.
    pub(crate) fn expected(&self) -> Option<&Type> {
        self.expected.as_ref()
    }

    pub(crate) fn interpolators(&self) -> &'a Interpolators {
        self.interpolators
    }

    /// Context for the argument at `index`, expected to produce `expected`.
    pub(crate) fn concat(&self, index: usize, expected: Option<Type>) -> ParsingContext<'a> {
        ParsingContext {
            key: child_key(&self.key, index),
            expected,
            scope: Rc::clone(&self.scope),
            errors: self.errors,
            interpolators: self.interpolators,
        }
    }

    /// Like [`Self::concat`], additionally bringing `bindings` into scope.
    pub(crate) fn concat_scoped(
        &self,
        index: usize,
        expected: Option<Type>,
        bindings: Vec<(Arc<str>, Type)>,
    ) -> ParsingContext<'a> {
        let mut child = self.concat(index, expected);
        child.scope = Rc::new(Scope {
            parent: Some(Rc::clone(&self.scope)),
            bindings,
        });
        child
    }

    /// Same position and scope, reporting into a separate sink. Used to try overloads without
    /// committing their diagnostics.
    pub(crate) fn with_sink<'b>(&self, errors: &'b RefCell<Vec<ParseError>>) -> ParsingContext<'b>
    where
        'a: 'b,
    {
        ParsingContext {
            key: self.key.clone(),
            expected: self.expected.clone(),
            scope: Rc::clone(&self.scope),
            errors,
            interpolators: self.interpolators,
        }
    }

    /// Move diagnostics collected in a side sink into this context's sink.
    pub(crate) fn absorb(&self, errors: Vec<ParseError>) {
        self.errors.borrow_mut().extend(errors);
    }

    /// Type of the variable `name` in the current scope.
    pub(crate) fn lookup_var(&self, name: &str) -> Option<Type> {
        self.scope.get(name).cloned()
    }

    /// Record a diagnostic at this node. Always returns `None` so parsers can
    /// `return ctx.error(...)`.
    pub(crate) fn error<T>(&self, message: impl Into<String>) -> Option<T> {
        self.errors
            .borrow_mut()
            .push(ParseError::new(self.key.clone(), message));
        None
    }

    /// Record a diagnostic at a descendant of this node addressed by argument indices.
    pub(crate) fn error_at<T>(&self, path: &[usize], message: impl Into<String>) -> Option<T> {
        let key = path
            .iter()
            .fold(self.key.clone(), |key, &i| child_key(&key, i));
        self.errors.borrow_mut().push(ParseError::new(key, message));
        None
    }
}

fn child_key(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        index.to_string()
    } else {
        format!("{parent}.{index}")
    }
}

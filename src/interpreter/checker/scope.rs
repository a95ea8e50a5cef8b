use std::{collections::HashMap, rc::Rc};

use crate::ast::{FunctionDef, Type};

/// The static signature of a user function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter names and types in declaration order.
    pub params:      Vec<(String, Type)>,
    /// The declared return type.
    pub return_type: Type,
}

impl From<&FunctionDef> for Signature {
    fn from(def: &FunctionDef) -> Self {
        Self { params:      def.params
                               .iter()
                               .map(|param| (param.name.clone(), param.ty))
                               .collect(),
               return_type: def.return_type, }
    }
}

/// One lexical scope: the variables and functions it declares and the index
/// of the scope enclosing it.
#[derive(Debug, Clone, Default)]
struct Scope {
    parent:    Option<usize>,
    variables: HashMap<String, Type>,
    functions: HashMap<String, Rc<Signature>>,
}

/// The scope chain of the type checker, stored as an arena addressed by
/// index.
///
/// Scope `0` is the global scope and is never removed. Scopes are entered
/// and left in strict LIFO order, so the current scope is always the last
/// one.
#[derive(Debug, Clone)]
pub struct Scopes {
    scopes:  Vec<Scope>,
    current: usize,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// Creates a chain holding only an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:  vec![Scope::default()],
               current: 0, }
    }

    /// Opens a child of the current scope and makes it current.
    ///
    /// Returns the index to hand back to [`Scopes::leave`].
    pub fn enter(&mut self) -> usize {
        let previous = self.current;
        self.scopes.push(Scope { parent: Some(previous),
                                 ..Scope::default() });
        self.current = self.scopes.len() - 1;
        previous
    }

    /// Discards the current scope and makes `previous` current again.
    pub fn leave(&mut self, previous: usize) {
        self.scopes.truncate(self.current.max(1));
        self.current = previous;
    }

    /// Binds `name` to `ty` in the current scope, shadowing outer bindings.
    pub fn declare_variable(&mut self, name: &str, ty: Type) {
        self.scopes[self.current].variables.insert(name.to_string(), ty);
    }

    /// Binds a function signature in the current scope.
    pub fn declare_function(&mut self, name: &str, signature: Signature) {
        self.scopes[self.current].functions
                                 .insert(name.to_string(), Rc::new(signature));
    }

    /// Resolves a variable through the scope chain, innermost first.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Type> {
        self.chain()
            .find_map(|scope| scope.variables.get(name).copied())
    }

    /// Resolves a function signature through the scope chain, innermost
    /// first.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<Rc<Signature>> {
        self.chain()
            .find_map(|scope| scope.functions.get(name).cloned())
    }

    /// Captures the global scope.
    pub(crate) fn snapshot(&self) -> GlobalSnapshot {
        GlobalSnapshot(self.scopes[0].clone())
    }

    /// Drops every nested scope and puts `snapshot` back as the global scope.
    pub(crate) fn restore(&mut self, snapshot: GlobalSnapshot) {
        self.scopes.truncate(1);
        self.scopes[0] = snapshot.0;
        self.current = 0;
    }

    /// The current scope followed by each of its ancestors.
    fn chain(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(&self.scopes[self.current]), |scope| {
            scope.parent.map(|parent| &self.scopes[parent])
        })
    }
}

/// A copy of the global scope taken before checking a program.
#[derive(Debug)]
pub(crate) struct GlobalSnapshot(Scope);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_walk_outward_and_respect_shadowing() {
        let mut scopes = Scopes::new();
        scopes.declare_variable("x", Type::Int);

        let previous = scopes.enter();
        assert_eq!(scopes.variable("x"), Some(Type::Int));

        scopes.declare_variable("x", Type::String);
        scopes.declare_variable("y", Type::Bool);
        assert_eq!(scopes.variable("x"), Some(Type::String));

        scopes.leave(previous);
        assert_eq!(scopes.variable("x"), Some(Type::Int));
        assert_eq!(scopes.variable("y"), None);
    }

    #[test]
    fn restore_discards_nested_scopes_and_new_globals() {
        let mut scopes = Scopes::new();
        scopes.declare_variable("kept", Type::Int);
        let snapshot = scopes.snapshot();

        scopes.declare_variable("dropped", Type::Int);
        scopes.enter();
        scopes.restore(snapshot);

        assert_eq!(scopes.variable("kept"), Some(Type::Int));
        assert_eq!(scopes.variable("dropped"), None);
    }
}

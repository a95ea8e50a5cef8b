use std::{collections::HashMap, rc::Rc};

use crate::{ast::FunctionDef, interpreter::value::Value};

#[derive(Debug, Clone, Default)]
struct Environment {
    parent:    Option<usize>,
    variables: HashMap<String, Value>,
    functions: HashMap<String, Rc<FunctionDef>>,
}

/// A saved copy of the global environment, see [`Environments::snapshot`].
#[derive(Debug)]
pub struct Globals(Environment);

/// The runtime environment chain, stored as an arena addressed by index.
///
/// Environment `0` holds the globals and lives as long as the interpreter.
/// A new environment is entered for every block and every call, with the
/// environment active at that point as its parent. Since calls are made from
/// the active environment, function bodies see the caller's bindings rather
/// than those of their definition site.
#[derive(Debug)]
pub struct Environments {
    frames:  Vec<Environment>,
    current: usize,
}

impl Default for Environments {
    fn default() -> Self {
        Self::new()
    }
}

impl Environments {
    /// Creates a chain holding only an empty global environment.
    #[must_use]
    pub fn new() -> Self {
        Self { frames:  vec![Environment::default()],
               current: 0, }
    }

    /// Opens a child of the active environment and activates it.
    ///
    /// Returns the index to hand back to [`Environments::leave`], which must
    /// be called on every exit path.
    pub fn enter(&mut self) -> usize {
        let previous = self.current;
        self.frames.push(Environment { parent: Some(previous),
                                       ..Environment::default() });
        self.current = self.frames.len() - 1;
        previous
    }

    /// Releases the active environment and reactivates `previous`.
    pub fn leave(&mut self, previous: usize) {
        self.frames.truncate(self.current.max(1));
        self.current = previous;
    }

    /// Number of live environments, globals included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Binds `name` in the active environment.
    pub fn declare(&mut self, name: &str, value: Value) {
        self.frames[self.current].variables
                                 .insert(name.to_string(), value);
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// Returns `false`, leaving everything untouched, if there is none.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        let Some(index) = self.chain()
                              .find(|&index| self.frames[index].variables.contains_key(name))
        else {
            return false;
        };

        self.frames[index].variables
                          .insert(name.to_string(), value);
        true
    }

    /// Looks a variable up through the chain, innermost first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.chain()
            .find_map(|index| self.frames[index].variables.get(name))
    }

    /// Binds a function definition in the active environment.
    pub fn declare_function(&mut self, def: Rc<FunctionDef>) {
        self.frames[self.current].functions
                                 .insert(def.name.clone(), def);
    }

    /// Looks a function up through the chain, innermost first.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.chain()
            .find_map(|index| self.frames[index].functions.get(name).cloned())
    }

    /// Copies the global environment.
    #[must_use]
    pub fn snapshot(&self) -> Globals {
        Globals(self.frames[0].clone())
    }

    /// Replaces the global environment with `snapshot` and drops every other
    /// environment.
    pub fn restore(&mut self, snapshot: Globals) {
        self.frames.truncate(1);
        self.frames[0] = snapshot.0;
        self.current = 0;
    }

    /// Indices of the active environment and each of its ancestors.
    fn chain(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.current), |&index| self.frames[index].parent)
    }
}

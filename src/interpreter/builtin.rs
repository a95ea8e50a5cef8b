use std::fmt;

use crate::ast::{InputKind, Type};

/// Defines the built-in functions by generating the [`Builtin`] enum and its
/// metadata.
///
/// Each entry provides:
/// - the variant name,
/// - the name the function is called by,
/// - the exact number of arguments,
/// - the static result type.
///
/// The macro produces:
/// - `Builtin` (one variant per function),
/// - `Builtin::name`, `Builtin::arity` and `Builtin::return_type`,
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $variant:ident => {
                name: $name:literal,
                arity: $arity:expr,
                returns: $returns:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A function implemented by the host rather than by a program.
        ///
        /// Built-ins are resolved before user functions, so a user function
        /// with the same name is never reachable.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl Builtin {
            const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The name the built-in is called by.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The exact number of arguments the built-in takes.
            #[must_use]
            pub const fn arity(self) -> usize {
                match self {
                    $(Self::$variant => $arity,)*
                }
            }

            /// The static type of a call to the built-in.
            #[must_use]
            pub const fn return_type(self) -> Type {
                match self {
                    $(Self::$variant => $returns,)*
                }
            }
        }

        /// Names of all built-in functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    Print      => { name: "print",       arity: 1, returns: Type::Void },
    Output     => { name: "output",      arity: 1, returns: Type::Void },
    ReadString => { name: "read_string", arity: 0, returns: Type::String },
    ReadInt    => { name: "read_int",    arity: 0, returns: Type::Int },
}

impl Builtin {
    /// Finds the built-in called `name`.
    ///
    /// ## Example
    /// ```
    /// use azhar::{ast::Type, interpreter::builtin::Builtin};
    ///
    /// let read_int = Builtin::lookup("read_int").unwrap();
    ///
    /// assert_eq!(read_int.arity(), 0);
    /// assert_eq!(read_int.return_type(), Type::Int);
    /// assert_eq!(Builtin::lookup("square"), None);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter()
                 .copied()
                 .find(|builtin| builtin.name() == name)
    }
}

impl From<InputKind> for Builtin {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::String => Self::ReadString,
            InputKind::Int => Self::ReadInt,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in BUILTIN_FUNCTIONS {
            let builtin = Builtin::lookup(name).unwrap();
            assert_eq!(builtin.to_string(), *name);
        }
    }
}

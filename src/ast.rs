use std::{fmt, rc::Rc};

/// A position in the source text.
///
/// Both fields are 1-based. Columns count characters, not bytes, from the
/// start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Line number in the source code.
    pub line: usize,
    /// Column number in the source code.
    pub col:  usize,
}

impl Location {
    /// Creates a location from a line and column pair.
    ///
    /// ## Example
    /// ```
    /// use azhar::ast::Location;
    ///
    /// let location = Location::new(3, 7);
    ///
    /// assert_eq!(location.to_string(), "3:7");
    /// ```
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A static type of the language.
///
/// Two types are equal iff they are the same variant. There is no coercion and
/// no subtyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// `int`, a 64-bit signed integer.
    Int,
    /// `string`
    String,
    /// `bool`
    Bool,
    /// `void`, the result of statements and of functions without a return
    /// annotation.
    Void,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Void => "void",
        };
        write!(f, "{name}")
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: integers, strings and booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A string literal with escapes already resolved.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl LiteralValue {
    /// The static type of the literal.
    #[must_use]
    pub const fn ty(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Int,
            Self::Str(_) => Type::String,
            Self::Bool(_) => Type::Bool,
        }
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Which console read a `read_string()` / `read_int()` expression performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `read_string()`
    String,
    /// `read_int()`
    Int,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant records the location of the token that defines it; for
/// binary operations that is the operator token.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Location in the source code.
        location: Location,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Location in the source code.
        location: Location,
    },
    /// A unary operation (`+x`, `-x`).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Location in the source code.
        location: Location,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Location of the operator token.
        location: Location,
    },
    /// Function call expression (e.g. `add(1, 2)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in source order.
        arguments: Vec<Self>,
        /// Location in the source code.
        location:  Location,
    },
    /// `read_string()` or `read_int()`.
    ReadInput {
        /// Which read to perform.
        kind:     InputKind,
        /// Location in the source code.
        location: Location,
    },
}

impl Expr {
    /// Gets the source location from `self`.
    /// ## Example
    /// ```
    /// use azhar::ast::{Expr, Location};
    ///
    /// let expr = Expr::Variable { name:     "x".to_string(),
    ///                             location: Location::new(5, 2), };
    ///
    /// assert_eq!(expr.location(), Location::new(5, 2));
    /// ```
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::Literal { location, .. }
            | Self::Variable { location, .. }
            | Self::UnaryOp { location, .. }
            | Self::BinaryOp { location, .. }
            | Self::Call { location, .. }
            | Self::ReadInput { location, .. } => *location,
        }
    }
}

/// A sequence of statements delimited by `do` ... `end` (or `else`).
///
/// Each block introduces its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Location in the source code.
    pub location:   Location,
}

/// A declared function parameter, `name: type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name.
    pub name:     String,
    /// The declared type.
    pub ty:       Type,
    /// Location in the source code.
    pub location: Location,
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:        String,
    /// The parameters in declaration order.
    pub params:      Vec<Parameter>,
    /// The declared return type, `void` when the annotation is omitted.
    pub return_type: Type,
    /// The function body.
    pub body:        Block,
    /// Location of the `function` keyword.
    pub location:    Location,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration, `let name: type = value`.
    VariableDeclaration {
        /// The name of the variable.
        name:     String,
        /// The declared type.
        ty:       Type,
        /// The initial value of the variable.
        value:    Expr,
        /// Location of the variable name.
        location: Location,
    },
    /// An assignment to an existing variable, `name = value`.
    Assignment {
        /// The name of the variable.
        name:     String,
        /// The value which is being assigned.
        value:    Expr,
        /// Location of the variable name.
        location: Location,
    },
    /// `if cond do ... [else ...] end`
    If {
        /// The branch condition.
        condition:  Expr,
        /// Statements run when the condition holds.
        then_block: Block,
        /// Statements run otherwise; an `else if` is a block holding a single
        /// nested `If`.
        else_block: Option<Block>,
        /// Location of the `if` keyword.
        location:   Location,
    },
    /// `while cond do ... end`
    While {
        /// The loop condition, evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Location of the `while` keyword.
        location:  Location,
    },
    /// `break`
    Break {
        /// Location in the source code.
        location: Location,
    },
    /// A standalone `do ... end` block.
    Block(Block),
    /// A user-defined function declaration.
    Function(Rc<FunctionDef>),
    /// `return [value]`
    Return {
        /// The returned value, if any.
        value:    Option<Expr>,
        /// Location in the source code.
        location: Location,
    },
    /// `print(expr)`, writes the value followed by a newline.
    Print {
        /// The printed expression.
        expr:     Expr,
        /// Location in the source code.
        location: Location,
    },
    /// `output(expr)`, writes the value without a newline.
    Output {
        /// The written expression.
        expr:     Expr,
        /// Location in the source code.
        location: Location,
    },
    /// A standalone expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr:     Expr,
        /// Location in the source code.
        location: Location,
    },
}

impl Statement {
    /// Gets the source location from `self`.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::VariableDeclaration { location, .. }
            | Self::Assignment { location, .. }
            | Self::If { location, .. }
            | Self::While { location, .. }
            | Self::Break { location }
            | Self::Return { location, .. }
            | Self::Print { location, .. }
            | Self::Output { location, .. }
            | Self::Expression { location, .. } => *location,
            Self::Block(block) => block.location,
            Self::Function(def) => def.location,
        }
    }

    fn defines(&self, def: &FunctionDef) -> bool {
        match self {
            Self::Function(own) => std::ptr::eq(own.as_ref(), def) || own.body.defines(def),
            Self::Block(block) | Self::While { body: block, .. } => block.defines(def),
            Self::If { then_block,
                       else_block,
                       .. } => {
                then_block.defines(def) || else_block.as_ref().is_some_and(|block| block.defines(def))
            },
            _ => false,
        }
    }
}

impl Block {
    fn defines(&self, def: &FunctionDef) -> bool {
        self.statements.iter().any(|statement| statement.defines(def))
    }
}

/// The root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Whether `def` is the very definition node of one of this program's
    /// functions, at any nesting level.
    ///
    /// Definitions are compared by address, so an equal function parsed from
    /// another source does not count.
    #[must_use]
    pub fn defines(&self, def: &FunctionDef) -> bool {
        self.statements.iter().any(|statement| statement.defines(def))
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Floor division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

impl BinaryOperator {
    /// `+`, `-`, `*` and `/`.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    /// `<`, `<=`, `>` and `>=`.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual)
    }

    /// `==` and `!=`.
    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// `and` and `or`.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Represents a unary prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic identity (e.g. `+x`).
    Plus,
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Negate => write!(f, "-"),
        }
    }
}

/// The built-in function table.
///
/// Lists the functions the host provides (`print`, `output`, `read_string`,
/// `read_int`) together with their arity and result type. The type checker
/// and the evaluator both resolve calls through this table before looking for
/// user functions.
pub mod builtin;
/// The type checker validates a syntax tree before it is run.
///
/// It walks the tree once, resolving a static type for every expression
/// against a chain of lexical scopes, and rejects the program at the first
/// inconsistency.
///
/// # Responsibilities
/// - Resolves variable and function names through nested scopes.
/// - Enforces operand, assignment, condition and argument types.
/// - Reports type errors with the location of the offending construct.
pub mod checker;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and logical operations, manages variable state, and
/// performs console input and output. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow (`while`, `break`,
///   `return`).
/// - Reports runtime errors such as division by zero or invalid input.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Resolves operator precedence and `do`/`end` block nesting.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are integers, strings and booleans, plus `void` for calls that do
/// not return anything.
pub mod value;

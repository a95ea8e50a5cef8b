use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, Location, Program},
    error::{Diagnostic, ParseError},
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical_or, statement::parse_statement, utils::peek},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of nested expressions and blocks in one program.
///
/// Every grouping, prefix operator, block and `else if` link counts as one
/// level. Deeper programs are rejected with `ParseError::NestingTooDeep`
/// rather than exhausting the stack of the parser, checker or evaluator.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parses a token stream into a [`Program`].
///
/// Newline tokens are dropped first: the grammar is newline-insensitive and
/// blocks are delimited by `do`/`end`. Statements are parsed until
/// [`Token::Eof`].
///
/// # Parameters
/// - `tokens`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
/// - `file`: The file label used in diagnostics.
///
/// # Example
/// ```
/// use azhar::interpreter::{lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("let x: int = 1\nprint(x)", "<eval>").unwrap();
/// let program = parse(&tokens, "<eval>").unwrap();
///
/// assert_eq!(program.statements.len(), 2);
///
/// let tokens = tokenize("while true print(1) end", "<eval>").unwrap();
/// let error = parse(&tokens, "<eval>").unwrap_err();
///
/// assert_eq!(error.message, "Expected 'do', found 'print'");
/// ```
pub fn parse(tokens: &[(Token, Location)], file: &str) -> Result<Program, Diagnostic> {
    let mut iter = tokens.iter()
                         .filter(|(token, _)| *token != Token::NewLine)
                         .peekable();

    let program = parse_program(&mut iter).map_err(|e| Diagnostic::from_report(file, &e))?;

    debug!(file, statements = program.statements.len(), "parsed program");

    Ok(program)
}

/// Parses top-level statements until the end of input.
fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let mut statements = Vec::new();

    while !matches!(peek(tokens), (Token::Eof, _)) {
        statements.push(parse_statement(tokens)?);
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_logical_or(tokens)
}

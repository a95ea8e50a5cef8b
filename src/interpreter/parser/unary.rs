use std::iter::Peekable;

use crate::{
    ast::{Expr, InputKind, LiteralValue, Location, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{
                Nesting, advance, expect, parse_comma_separated, parse_identifier, peek,
                peek_second,
            },
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `+` (identity) and `-` (negation). Unary
/// operators are right-associative, so `- -x` parses as `-(-x)`.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-") unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let _nesting = Nesting::enter(peek(tokens).1)?;

    let op = match peek(tokens) {
        (Token::Plus, _) => UnaryOperator::Plus,
        (Token::Minus, _) => UnaryOperator::Negate,
        _ => return parse_primary(tokens),
    };
    let (_, location) = advance(tokens);

    let expr = parse_unary(tokens)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       location: *location })
}

/// Parses a primary (atomic) expression.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | call
///              | "(" expression ")"
///              | "read_string" "(" ")"
///              | "read_int" "(" ")"
/// ```
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for any token that cannot start an
/// expression.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (token, location) = peek(tokens);
    let location = *location;

    let literal = |value: LiteralValue| Expr::Literal { value, location };

    match token {
        Token::Integer(n) => {
            tokens.next();
            Ok(literal((*n).into()))
        },
        Token::Str(s) => {
            tokens.next();
            Ok(literal(s.as_str().into()))
        },
        Token::Bool(b) => {
            tokens.next();
            Ok(literal((*b).into()))
        },
        Token::Identifier(name) => {
            if *peek_second(tokens) == Token::LParen {
                return parse_call(tokens);
            }
            tokens.next();
            Ok(Expr::Variable { name: name.clone(),
                                location })
        },
        Token::LParen => parse_grouping(tokens),
        Token::ReadString => parse_read(tokens, InputKind::String),
        Token::ReadInt => parse_read(tokens, InputKind::Int),
        token => Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                   location }),
    }
}

/// Parses a call of the form `name(arg1, arg2, ..., argN)`.
///
/// Grammar: `call := identifier "(" (expression ("," expression)*)? ")"`
///
/// # Errors
/// Returns a `ParseError` if the name or the parentheses are missing, or an
/// argument fails to parse.
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (name, location) = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;

    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;

    Ok(Expr::Call { name,
                    arguments,
                    location })
}

/// Parses a parenthesized expression and returns the inner expression as-is.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    Ok(expr)
}

/// Parses `read_string()` or `read_int()`; the keyword is the next token.
fn parse_read<'a, I>(tokens: &mut Peekable<I>, kind: InputKind) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (_, location) = advance(tokens);
    expect(tokens, &Token::LParen)?;
    expect(tokens, &Token::RParen)?;

    Ok(Expr::ReadInput { kind,
                         location: *location })
}

use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Location},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary, utils::peek},
    },
};

/// Parses logical OR expressions.
///
/// Grammar: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_associative(tokens,
                           parse_logical_and,
                           |op| matches!(op, BinaryOperator::Or))
}

/// Parses logical AND expressions.
///
/// Grammar: `logical_and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_associative(tokens,
                           parse_equality,
                           |op| matches!(op, BinaryOperator::And))
}

/// Parses `==` and `!=`.
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_associative(tokens, parse_relational, BinaryOperator::is_equality)
}

/// Parses `<`, `<=`, `>` and `>=`.
///
/// Grammar: `relational := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_associative(tokens, parse_additive, BinaryOperator::is_relational)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_associative(tokens,
                           parse_multiplicative,
                           |op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub))
}

/// Parses multiplication and division expressions.
///
/// Grammar: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_associative(tokens,
                           parse_unary,
                           |op| matches!(op, BinaryOperator::Mul | BinaryOperator::Div))
}

/// Folds `operand (op operand)*` into a left-leaning tree of
/// [`Expr::BinaryOp`] nodes, for every operator accepted by `accepts`.
///
/// Each node is located at its operator token.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                                 accepts: fn(BinaryOperator) -> bool)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let mut left = operand(tokens)?;

    loop {
        let (token, location) = peek(tokens);
        if let Some(op) = token_to_binary_operator(token)
           && accepts(op)
        {
            tokens.next();

            let right = operand(tokens)?;

            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    location: *location };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Maps a token to its binary operator, if it is one.
///
/// ## Example
/// ```
/// use azhar::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Slash),
///            Some(BinaryOperator::Div));
/// assert_eq!(token_to_binary_operator(&Token::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

use std::{cell::Cell, iter::Peekable};

use crate::{
    ast::{Location, Type},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{MAX_NESTING_DEPTH, ParseResult},
    },
};

thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// Stands in for the stream end when a token slice lacks its trailing `Eof`.
static END_OF_INPUT: (Token, Location) = (Token::Eof, Location::new(0, 0));

/// One level of syntactic nesting, held for as long as the nested construct
/// is being parsed.
///
/// Levels are counted per thread and released on drop, so an error bubbling
/// out of a nested construct unwinds the count too.
pub(in crate::interpreter::parser) struct Nesting(());

impl Nesting {
    /// Enters one more level of nesting for the construct at `location`.
    ///
    /// # Errors
    /// Returns `ParseError::NestingTooDeep` once [`MAX_NESTING_DEPTH`] levels
    /// are already held.
    pub(in crate::interpreter::parser) fn enter(location: Location) -> ParseResult<Self> {
        NESTING.with(|depth| {
            if depth.get() >= MAX_NESTING_DEPTH {
                return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                        location });
            }
            depth.set(depth.get() + 1);
            Ok(Self(()))
        })
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        NESTING.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Returns the next token without consuming it.
///
/// An exhausted stream reads as [`Token::Eof`], so callers never have to
/// handle `None` separately.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>)
                                                  -> &'a (Token, Location)
    where I: Iterator<Item = &'a (Token, Location)>
{
    tokens.peek().copied().unwrap_or(&END_OF_INPUT)
}

/// Consumes the next token, reading an exhausted stream as [`Token::Eof`].
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>)
                                                     -> &'a (Token, Location)
    where I: Iterator<Item = &'a (Token, Location)>
{
    tokens.next().unwrap_or(&END_OF_INPUT)
}

/// Returns the token after the next one without consuming anything.
pub(in crate::interpreter::parser) fn peek_second<'a, I>(tokens: &Peekable<I>) -> &'a Token
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();
    lookahead.next().map_or(&END_OF_INPUT.0, |(token, _)| token)
}

/// Consumes `expected` and returns its location.
///
/// # Errors
/// Returns `ParseError::Expected` naming both tokens if the next token is
/// something else; nothing is consumed in that case.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Location>
    where I: Iterator<Item = &'a (Token, Location)>
{
    match peek(tokens) {
        (token, location) if token == expected => {
            tokens.next();
            Ok(*location)
        },
        (token, location) => Err(ParseError::Expected { expected: expected.to_string(),
                                                        found:    token.to_string(),
                                                        location: *location, }),
    }
}

/// Parses a plain identifier and returns its name and location.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Location)>
    where I: Iterator<Item = &'a (Token, Location)>
{
    match peek(tokens) {
        (Token::Identifier(name), location) => {
            tokens.next();
            Ok((name.clone(), *location))
        },
        (token, location) => Err(ParseError::Expected { expected: "identifier".to_string(),
                                                        found:    token.to_string(),
                                                        location: *location, }),
    }
}

/// Parses a type name: `int`, `string`, `bool` or `void`.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a type name.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<Type>
    where I: Iterator<Item = &'a (Token, Location)>
{
    match peek(tokens) {
        (Token::Type(ty), _) => {
            tokens.next();
            Ok(*ty)
        },
        (token, location) => Err(ParseError::Expected { expected: "type".to_string(),
                                                        found:    token.to_string(),
                                                        location: *location, }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call argument lists and function parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - anything other than `,` or the closing token follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let mut items = Vec::new();
    if peek(tokens).0 == *closing {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match peek(tokens) {
            (Token::Comma, _) => {
                tokens.next();
            },
            (token, _) if token == closing => {
                tokens.next();
                break;
            },
            (token, location) => {
                return Err(ParseError::Expected { expected: format!("',' or {closing}"),
                                                  found:    token.to_string(),
                                                  location: *location, });
            },
        }
    }
    Ok(items)
}

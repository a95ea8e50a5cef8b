use std::iter::Peekable;

use crate::{
    ast::{Block, Location},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{Nesting, peek},
        },
    },
};

/// Parses the statements of a block.
///
/// Parsing continues until the next token is `end` or `else`; that token is
/// left for the caller, which knows which one closes its construct.
///
/// Grammar: `block := statement*`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening `do`.
/// - `location`: Location of the opening `do`.
///
/// # Errors
/// Returns `ParseError::UnexpectedEndOfInput` if the input ends inside the
/// block, or `ParseError::NestingTooDeep` if blocks nest too deeply.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, location: Location) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let _nesting = Nesting::enter(location)?;
    let mut statements = Vec::new();

    loop {
        match peek(tokens) {
            (Token::End | Token::Else, _) => break,
            (Token::Eof, eof) => {
                return Err(ParseError::UnexpectedEndOfInput { location: *eof });
            },
            _ => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(Block { statements,
               location })
}

/// Consumes the `end` closing `construct`, opened at `location`.
///
/// # Errors
/// Returns `ParseError::Unclosed` if the next token is not `end`.
pub fn parse_end<'a, I>(tokens: &mut Peekable<I>,
                        construct: &'static str,
                        location: Location)
                        -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Location)>
{
    if let (Token::End, _) = peek(tokens) {
        tokens.next();
        Ok(())
    } else {
        Err(ParseError::Unclosed { construct,
                                   location })
    }
}

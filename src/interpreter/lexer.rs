use std::fmt;

use logos::Logos;
use tracing::debug;

use crate::{
    ast::{Location, Type},
    error::{Diagnostic, LexicalError, LexicalErrorKind},
};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras, error = LexicalErrorKind)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    #[regex(r"[0-9]+\.[0-9]*", reject_float)]
    Integer(i64),
    /// String literal tokens with escapes resolved, such as `"hi\n"`.
    #[regex(r#""([^"\\]|\\(.|\n))*""#, parse_string, allow_greedy = true)]
    #[regex(r#""([^"\\]|\\(.|\n))*\\?"#, unterminated_string, allow_greedy = true)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// Type names: `int`, `string`, `bool` and `void`.
    #[token("int", |_| Type::Int)]
    #[token("string", |_| Type::String)]
    #[token("bool", |_| Type::Bool)]
    #[token("void", |_| Type::Void)]
    Type(Type),
    /// `let`
    #[token("let")]
    Let,
    /// `function`
    #[token("function")]
    Function,
    /// `do`
    #[token("do")]
    Do,
    /// `end`
    #[token("end")]
    End,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `break`
    #[token("break")]
    Break,
    /// `return`
    #[token("return")]
    Return,
    /// `print`
    #[token("print")]
    Print,
    /// `output`
    #[token("output")]
    Output,
    /// `read_string`
    #[token("read_string")]
    ReadString,
    /// `read_int`
    #[token("read_int")]
    ReadInt,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens; variable or function names such as `x`, `square`
    /// or `café`. Any Unicode letter may start a name.
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`, reserved.
    #[token("[")]
    LBracket,
    /// `]`, reserved.
    #[token("]")]
    RBracket,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`, reserved.
    #[token(".")]
    Dot,
    /// `->`
    #[token("->")]
    Arrow,
    /// Line breaks. The grammar ignores them, but they keep locations right.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by the `logos` lexer itself; appended by
    /// [`tokenize`].
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "integer {value}"),
            Self::Str(value) => write!(f, "string {value:?}"),
            Self::Bool(value) => write!(f, "'{value}'"),
            Self::Type(ty) => write!(f, "type '{ty}'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Eof => write!(f, "end of input"),
            Self::NewLine => write!(f, "newline"),
            other => write!(f, "'{}'", other.symbol()),
        }
    }
}

impl Token {
    /// The source spelling of keyword and punctuation tokens.
    const fn symbol(&self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Function => "function",
            Self::Do => "do",
            Self::End => "end",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Break => "break",
            Self::Return => "return",
            Self::Print => "print",
            Self::Output => "output",
            Self::ReadString => "read_string",
            Self::ReadInt => "read_int",
            Self::And => "and",
            Self::Or => "or",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Arrow => "->",
            Self::Comment => "//",
            Self::Ignored => " ",
            Self::Integer(_)
            | Self::Str(_)
            | Self::Bool(_)
            | Self::Type(_)
            | Self::Identifier(_)
            | Self::NewLine
            | Self::Eof => "",
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset at which it starts, so that
/// every token can be given a line and column.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Tokenizes `source`, labelling diagnostics with `file`.
///
/// Line breaks are kept as [`Token::NewLine`] and the stream always ends with
/// [`Token::Eof`]. Each token is paired with the location of its first
/// character.
///
/// ## Example
/// ```
/// use azhar::{ast::Location, interpreter::lexer::{Token, tokenize}};
///
/// let tokens = tokenize("let x: int = 42", "<eval>").unwrap();
///
/// assert_eq!(tokens[0], (Token::Let, Location::new(1, 1)));
/// assert_eq!(tokens[1], (Token::Identifier("x".to_string()), Location::new(1, 5)));
/// assert_eq!(tokens[5], (Token::Integer(42), Location::new(1, 14)));
/// assert_eq!(tokens.last().map(|(t, _)| t), Some(&Token::Eof));
///
/// let error = tokenize("let y: int = 1.5", "<eval>").unwrap_err();
/// assert_eq!(error.to_string(),
///            "<eval>:1:14: LexicalError: Floats are not supported.\n  let y: int = 1.5\n               ^");
/// ```
pub fn tokenize(source: &str, file: &str) -> Result<Vec<(Token, Location)>, Diagnostic> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    loop {
        let line = lexer.extras.line;
        let line_start = lexer.extras.line_start;

        let Some(token) = lexer.next() else {
            break;
        };
        let location = Location::new(line, column(source, line_start, lexer.span().start));

        match token {
            Ok(token) => tokens.push((token, location)),
            Err(kind) => {
                let lexeme = lexer.slice();
                let kind = if kind == LexicalErrorKind::UnexpectedCharacter && lexeme.starts_with('!') {
                    LexicalErrorKind::StrayBang
                } else {
                    kind
                };
                let error =
                    LexicalError::new(kind, lexeme, location, current_line(source, line_start));
                return Err(Diagnostic::from_report(file, &error));
            },
        }
    }

    let end = Location::new(lexer.extras.line,
                            column(source, lexer.extras.line_start, source.len()));
    tokens.push((Token::Eof, end));

    debug!(file, count = tokens.len(), "tokenized source");

    Ok(tokens)
}

/// 1-based character column of byte `offset` on the line starting at
/// `line_start`.
fn column(source: &str, line_start: usize, offset: usize) -> usize {
    source.get(line_start..offset)
          .map_or(0, |prefix| prefix.chars().count())
          + 1
}

/// The full text of the line starting at byte `line_start`.
fn current_line(source: &str, line_start: usize) -> &str {
    source.get(line_start..)
          .and_then(|rest| rest.lines().next())
          .unwrap_or_default()
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Ok(i64)`: The parsed value.
/// - `Err(IntegerTooLarge)`: If the literal does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexicalErrorKind> {
    lex.slice()
       .parse()
       .map_err(|_| LexicalErrorKind::IntegerTooLarge)
}

/// Integer literals followed by `.` are rejected; the language has no floats.
fn reject_float(_: &logos::Lexer<Token>) -> Result<i64, LexicalErrorKind> {
    Err(LexicalErrorKind::FloatLiteral)
}

/// Resolves the escapes of a terminated string literal.
///
/// `\n`, `\t` and `\"` are translated; any other escaped character is kept as
/// is. Line breaks inside the literal advance the line counter.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    if let Some(last) = slice.rfind('\n') {
        lex.extras.line += slice.matches('\n').count();
        lex.extras.line_start = lex.span().start + last + 1;
    }

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => {},
        }
    }
    value
}

fn unterminated_string(_: &logos::Lexer<Token>) -> Result<String, LexicalErrorKind> {
    Err(LexicalErrorKind::UnterminatedString)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source, "test").unwrap()
                                .into_iter()
                                .map(|(token, _)| token)
                                .collect()
    }

    #[test]
    fn prefers_two_character_operators() {
        assert_eq!(kinds("-> == != <= >= - = < >"),
                   vec![Token::Arrow,
                        Token::EqualEqual,
                        Token::BangEqual,
                        Token::LessEqual,
                        Token::GreaterEqual,
                        Token::Minus,
                        Token::Equals,
                        Token::Less,
                        Token::Greater,
                        Token::Eof]);
    }

    #[test]
    fn classifies_keywords_types_and_identifiers() {
        assert_eq!(kinds("let print_x: int function read_int"),
                   vec![Token::Let,
                        Token::Identifier("print_x".to_string()),
                        Token::Colon,
                        Token::Type(Type::Int),
                        Token::Function,
                        Token::ReadInt,
                        Token::Eof]);
    }

    #[test]
    fn accepts_unicode_letters_in_identifiers() {
        assert_eq!(kinds("let café: int = 1"),
                   vec![Token::Let,
                        Token::Identifier("café".to_string()),
                        Token::Colon,
                        Token::Type(Type::Int),
                        Token::Equals,
                        Token::Integer(1),
                        Token::Eof]);
        assert_eq!(kinds("_δ2 名前"),
                   vec![Token::Identifier("_δ2".to_string()),
                        Token::Identifier("名前".to_string()),
                        Token::Eof]);

        let tokens = tokenize("é = x", "test").unwrap();
        assert_eq!(tokens[2], (Token::Identifier("x".to_string()), Location::new(1, 5)));
    }

    #[test]
    fn keeps_newlines_and_drops_comments() {
        assert_eq!(kinds("1 // one\n2"),
                   vec![Token::Integer(1), Token::NewLine, Token::Integer(2), Token::Eof]);
    }

    #[test]
    fn resolves_string_escapes() {
        assert_eq!(kinds(r#""a\n\t\"\q""#),
                   vec![Token::Str("a\n\t\"q".to_string()), Token::Eof]);
    }

    #[test]
    fn tracks_lines_through_multiline_strings() {
        let tokens = tokenize("\"a\nb\" x", "test").unwrap();

        assert_eq!(tokens[0], (Token::Str("a\nb".to_string()), Location::new(1, 1)));
        assert_eq!(tokens[1], (Token::Identifier("x".to_string()), Location::new(2, 4)));
    }

    #[test]
    fn reports_lexical_errors_at_the_lexeme() {
        let cases = [("let x = @", "Unexpected character '@'", 9),
                     ("if !x", "Unexpected '!'", 4),
                     ("print(\"abc", "Unterminated string.", 7),
                     ("1.", "Floats are not supported.", 1),
                     ("99999999999999999999", "Integer literal is too large.", 1)];

        for (source, message, col) in cases {
            let error = tokenize(source, "test").unwrap_err();
            assert_eq!(error.message, message, "{source}");
            assert_eq!(error.location, Some(Location::new(1, col)), "{source}");
            assert_eq!(error.snippet.as_deref(), Some(source));
        }
    }

    #[test]
    fn eof_sits_after_the_last_character() {
        let tokens = tokenize("x\nab", "test").unwrap();

        assert_eq!(tokens.last(), Some(&(Token::Eof, Location::new(2, 3))));
    }
}

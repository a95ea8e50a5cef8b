use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Block, FunctionDef, Location, Parameter, Statement, Type},
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_end},
            core::{ParseResult, parse_expression},
            unary::parse_call,
            utils::{
                Nesting, advance, expect, parse_comma_separated, parse_identifier, parse_type,
                peek, peek_second,
            },
        },
    },
};

/// Parses a single statement.
///
/// The statement form is chosen by the next token, with one extra token of
/// lookahead after an identifier:
/// - `function`, `let`, `if`, `while`, `break`, `return`, `print`, `output`
///   and `do` start their own statement forms.
/// - `name =` starts an assignment.
/// - `name (` is a call statement, which parses exactly one call.
/// - anything else is parsed as an expression statement.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (token, location) = peek(tokens);
    let location = *location;

    match token {
        Token::Function => parse_function_definition(tokens),
        Token::Let => parse_variable_declaration(tokens),
        Token::If => parse_if(tokens),
        Token::While => parse_while(tokens),
        Token::Break => {
            tokens.next();
            Ok(Statement::Break { location })
        },
        Token::Return => parse_return(tokens),
        Token::Print | Token::Output => parse_output(tokens),
        Token::Do => {
            tokens.next();
            let block = parse_block(tokens, location)?;
            parse_end(tokens, "block", location)?;
            Ok(Statement::Block(block))
        },
        Token::Identifier(_) if *peek_second(tokens) == Token::Equals => parse_assignment(tokens),
        Token::Identifier(_) if *peek_second(tokens) == Token::LParen => {
            let expr = parse_call(tokens)?;
            Ok(Statement::Expression { expr, location })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            Ok(Statement::Expression { expr, location })
        },
    }
}

/// Parses a variable declaration of the form `let <name>: <type> = <expr>`.
///
/// The statement is located at the variable name.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::Let)?;
    let (name, location) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon)?;
    let ty = parse_type(tokens)?;
    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::VariableDeclaration { name,
                                        ty,
                                        value,
                                        location })
}

/// Parses an assignment of the form `<name> = <expr>`.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (name, location) = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assignment { name,
                               value,
                               location })
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     function <name>(<param>: <type>, ...) [-> <type>] do <statements> end
/// ```
/// A missing return annotation means `void`.
///
/// # Errors
/// Returns a `ParseError` if any part of the signature is malformed, or
/// `ParseError::Unclosed` if the body is not closed by `end`.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let location = expect(tokens, &Token::Function)?;
    let (name, _) = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;

    let return_type = if let (Token::Arrow, _) = peek(tokens) {
        tokens.next();
        parse_type(tokens)?
    } else {
        Type::Void
    };

    let body_location = expect(tokens, &Token::Do)?;
    let body = parse_block(tokens, body_location)?;
    parse_end(tokens, "function", location)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name,
                                                 params,
                                                 return_type,
                                                 body,
                                                 location })))
}

/// Parses one `name: type` function parameter.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (name, location) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon)?;
    let ty = parse_type(tokens)?;

    Ok(Parameter { name, ty, location })
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if <condition> do <statements>
///     else if <condition> do <statements>
///     else do <statements>
///     end
/// ```
/// A single `end` closes the whole chain. Each `else if` link becomes a
/// nested `If`, wrapped in a one-statement block, that does not consume an
/// `end` of its own.
///
/// # Errors
/// Returns `ParseError::Unclosed` if the chain is not closed by `end`, and
/// propagates any errors from the conditions and branches.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let location = expect(tokens, &Token::If)?;
    let statement = parse_if_branches(tokens, location)?;
    parse_end(tokens, "if", location)?;

    Ok(statement)
}

/// Parses the condition and branches of one `if` link, positioned after the
/// `if` keyword. Leaves the closing `end` for [`parse_if`].
fn parse_if_branches<'a, I>(tokens: &mut Peekable<I>, location: Location) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let _nesting = Nesting::enter(location)?;
    let condition = parse_expression(tokens)?;

    let then_location = expect(tokens, &Token::Do)?;
    let then_block = parse_block(tokens, then_location)?;

    let else_block = if let (Token::Else, _) = peek(tokens) {
        tokens.next();

        if let (Token::If, link) = peek(tokens) {
            tokens.next();
            let nested = parse_if_branches(tokens, *link)?;
            Some(Block { statements: vec![nested],
                         location:   *link, })
        } else {
            let else_location = expect(tokens, &Token::Do)?;
            Some(parse_block(tokens, else_location)?)
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_block,
                       else_block,
                       location })
}

/// Parses `while <condition> do <statements> end`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let location = expect(tokens, &Token::While)?;
    let condition = parse_expression(tokens)?;

    let body_location = expect(tokens, &Token::Do)?;
    let body = parse_block(tokens, body_location)?;
    parse_end(tokens, "while", location)?;

    Ok(Statement::While { condition,
                          body,
                          location })
}

/// Parses `return` with an optional value.
///
/// The return is bare when followed by `end`, `else` or the end of input.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let location = expect(tokens, &Token::Return)?;

    let value = match peek(tokens) {
        (Token::End | Token::Else | Token::Eof, _) => None,
        _ => Some(parse_expression(tokens)?),
    };

    Ok(Statement::Return { value, location })
}

/// Parses `print(<expr>)` or `output(<expr>)`.
fn parse_output<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let (keyword, location) = advance(tokens);
    let location = *location;

    expect(tokens, &Token::LParen)?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    if *keyword == Token::Print {
        Ok(Statement::Print { expr, location })
    } else {
        Ok(Statement::Output { expr, location })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr, Statement},
        interpreter::{
            lexer::tokenize,
            parser::{MAX_NESTING_DEPTH, parse},
        },
    };

    fn parse_source(source: &str) -> Vec<Statement> {
        let tokens = tokenize(source, "test").unwrap();
        parse(&tokens, "test").unwrap().statements
    }

    fn parse_error(source: &str) -> String {
        let tokens = tokenize(source, "test").unwrap();
        parse(&tokens, "test").unwrap_err().message
    }

    #[test]
    fn else_if_chain_is_closed_by_one_end() {
        let statements = parse_source("if a do print(1)\n\
                                       else if b do print(2)\n\
                                       else if c do print(3)\n\
                                       else do print(4)\n\
                                       end\n\
                                       print(5)");

        assert_eq!(statements.len(), 2);

        let mut depth = 0;
        let mut current = &statements[0];
        while let Statement::If { else_block: Some(block), .. } = current {
            depth += 1;
            match block.statements.as_slice() {
                [nested @ Statement::If { .. }] => current = nested,
                [Statement::Print { .. }] => break,
                other => panic!("unexpected else block {other:?}"),
            }
        }
        assert_eq!(depth, 3);
    }

    #[test]
    fn nested_if_inside_else_needs_its_own_end() {
        assert_eq!(parse_source("if a do print(1) else do if b do print(2) end end").len(),
                   1);
        assert_eq!(parse_error("if a do print(1) else do if b do print(2) end"),
                   "Unexpected end of input in block");
    }

    #[test]
    fn binary_operators_respect_precedence() {
        let statements = parse_source("x = 1 + 2 * 3 < 10 and true or false");

        let Statement::Assignment { value: Expr::BinaryOp { op, left, .. }, .. } = &statements[0]
        else {
            panic!("expected an assignment");
        };
        assert_eq!(*op, BinaryOperator::Or);

        let Expr::BinaryOp { op, left, .. } = left.as_ref() else {
            panic!("expected 'and'");
        };
        assert_eq!(*op, BinaryOperator::And);

        let Expr::BinaryOp { op, left, .. } = left.as_ref() else {
            panic!("expected '<'");
        };
        assert_eq!(*op, BinaryOperator::Less);

        let Expr::BinaryOp { op, right, .. } = left.as_ref() else {
            panic!("expected '+'");
        };
        assert_eq!(*op, BinaryOperator::Add);
        assert!(matches!(right.as_ref(), Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let statements = parse_source("x = 10 - 4 - 3");

        let Statement::Assignment { value: Expr::BinaryOp { left, .. }, .. } = &statements[0]
        else {
            panic!("expected an assignment");
        };
        assert!(matches!(left.as_ref(), Expr::BinaryOp { op: BinaryOperator::Sub, .. }));
    }

    #[test]
    fn return_is_bare_before_end_and_else() {
        let statements = parse_source("function f() do if true do return else do return end end");

        let Statement::Function(def) = &statements[0] else {
            panic!("expected a function");
        };
        let Statement::If { then_block, else_block: Some(else_block), .. } =
            &def.body.statements[0]
        else {
            panic!("expected an if");
        };
        assert!(matches!(then_block.statements[0], Statement::Return { value: None, .. }));
        assert!(matches!(else_block.statements[0], Statement::Return { value: None, .. }));
    }

    #[test]
    fn call_statement_parses_a_single_call() {
        let statements = parse_source("f(1)\n-2");

        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[1],
                         Statement::Expression { expr: Expr::UnaryOp { .. }, .. }));
    }

    #[test]
    fn reports_malformed_constructs() {
        assert_eq!(parse_error("function f() do print(1)"),
                   "Unexpected end of input in block");
        assert_eq!(parse_error("function f() do print(1) else"),
                   "Expected 'end' to close function");
        assert_eq!(parse_error("let x int = 1"), "Expected ':', found type 'int'");
        assert_eq!(parse_error("print(+)"), "Unexpected token in expression: ')'");
        assert_eq!(parse_error("x = [1]"), "Unexpected token in expression: '['");
        assert_eq!(parse_error("if x do y = 1"), "Unexpected end of input in block");
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let too_deep = format!("Nesting deeper than {MAX_NESTING_DEPTH} levels");

        let parens = format!("print({}1{})", "(".repeat(1000), ")".repeat(1000));
        assert_eq!(parse_error(&parens), too_deep);

        let negations = format!("print({}1)", "- ".repeat(1000));
        assert_eq!(parse_error(&negations), too_deep);

        let blocks = format!("{}print(1){}", "do ".repeat(3000), " end".repeat(3000));
        assert_eq!(parse_error(&blocks), too_deep);

        let mut chain = "if a do print(0)".to_string();
        for _ in 0..1000 {
            chain.push_str(" else if a do print(0)");
        }
        chain.push_str(" end");
        assert_eq!(parse_error(&chain), too_deep);
    }

    #[test]
    fn nesting_within_the_limit_is_accepted() {
        let _ = parse_error(&format!("print({}1)", "(".repeat(1000)));

        let parens = format!("print({}1{})", "(".repeat(40), ")".repeat(40));
        assert_eq!(parse_source(&parens).len(), 1);

        let blocks = format!("{}print(1){}", "do ".repeat(40), " end".repeat(40));
        assert_eq!(parse_source(&blocks).len(), 1);
    }
}

use std::io::{BufRead, Write};

use crate::{
    ast::{Block, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        builtin::Builtin,
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Executes a single statement in the active environment.
    ///
    /// Returns how control leaves the statement: normally, or through a
    /// `break` or `return` that an enclosing loop or call has to handle.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VariableDeclaration { name, value, .. } => {
                let value = self.eval(value)?;
                self.env.declare(name, value);
                Ok(Flow::Normal)
            },
            Statement::Assignment { name,
                                    value,
                                    location, } => {
                let value = self.eval(value)?;
                if self.env.assign(name, value) {
                    Ok(Flow::Normal)
                } else {
                    Err(RuntimeError::AssignToUndeclared { name:     name.clone(),
                                                           location: *location, })
                }
            },
            Statement::If { condition,
                            then_block,
                            else_block,
                            .. } => {
                if self.eval(condition)?.is_truthy() {
                    self.exec_block(then_block)
                } else if let Some(else_block) = else_block {
                    self.exec_block(else_block)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::Break { location } => Ok(Flow::Break(*location)),
            Statement::Block(block) => self.exec_block(block),
            Statement::Function(def) => {
                self.env.declare_function(def.clone());
                Ok(Flow::Normal)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(value))
            },
            Statement::Print { expr, location } => {
                let value = self.eval(expr)?;
                self.call_builtin(Builtin::Print, &[value], *location)?;
                Ok(Flow::Normal)
            },
            Statement::Output { expr, location } => {
                let value = self.eval(expr)?;
                self.call_builtin(Builtin::Output, &[value], *location)?;
                Ok(Flow::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Runs statements in order, stopping at the first one that does not
    /// complete normally.
    pub(in crate::interpreter::evaluator) fn exec_statements(&mut self,
                                                              statements: &[Statement])
                                                              -> EvalResult<Flow> {
        for statement in statements {
            let flow = self.exec_statement(statement)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs a block in a child environment that is released on every exit
    /// path, errors included.
    pub(in crate::interpreter::evaluator) fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        let previous = self.env.enter();
        let result = self.exec_statements(&block.statements);
        self.env.leave(previous);
        result
    }

    /// Repeats `body` while `condition` is truthy.
    ///
    /// A `break` ends the loop normally. A `return` is handed on to the
    /// enclosing call unchanged.
    fn exec_while(&mut self, condition: &Expr, body: &Block) -> EvalResult<Flow> {
        while self.eval(condition)?.is_truthy() {
            match self.exec_block(body)? {
                Flow::Normal => {},
                Flow::Break(_) => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse};

    fn run(source: &str) -> String {
        let tokens = tokenize(source, "<test>").unwrap();
        let program = parse(&tokens, "<test>").unwrap();
        let mut interpreter = Interpreter::with_io("".as_bytes(), Vec::new());
        interpreter.run(&program).unwrap();
        String::from_utf8(interpreter.into_output()).unwrap()
    }

    #[test]
    fn break_leaves_only_the_innermost_loop() {
        let source = "let i: int = 0
                      while i < 2 do
                          while true do break end
                          print(i)
                          i = i + 1
                      end";

        assert_eq!(run(source), "0\n1\n");
    }

    #[test]
    fn block_declarations_do_not_outlive_the_block() {
        let source = "let x: int = 1
                      do let x: int = 2 x = 3 print(x) end
                      print(x)";

        assert_eq!(run(source), "3\n1\n");
    }

    #[test]
    fn output_writes_without_a_newline() {
        assert_eq!(run(r#"output("a") output(1) print(true)"#), "a1true\n");
    }

    #[test]
    fn top_level_return_stops_the_program() {
        assert_eq!(run("print(1) return 0 print(2)"), "1\n");
    }
}

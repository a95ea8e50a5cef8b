use std::io::{BufRead, Write};

use tracing::trace;

use crate::{
    ast::{Expr, Location},
    error::RuntimeError,
    interpreter::{
        builtin::Builtin,
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
};

/// Maximum number of nested user function calls.
pub const MAX_CALL_DEPTH: usize = 200;

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Evaluates a call expression.
    ///
    /// Built-ins are resolved first. Otherwise the user function is looked up
    /// through the active environment chain, its arguments are evaluated left
    /// to right in the caller's environment, and the body runs in a new
    /// environment whose parent is the caller's.
    ///
    /// The result is the value carried by `return`, or `Void` if the body
    /// finishes without one.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                        name: &str,
                                                        arguments: &[Expr],
                                                        location: Location)
                                                        -> EvalResult<Value> {
        if let Some(builtin) = Builtin::lookup(name) {
            let values = arguments.iter()
                                  .map(|argument| self.eval(argument))
                                  .collect::<EvalResult<Vec<_>>>()?;
            return self.call_builtin(builtin, &values, location);
        }

        let def = self.env
                      .function(name)
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                       location })?;

        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: def.params.len(),
                                                             found: arguments.len(),
                                                             location });
        }

        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH,
                                                         location });
        }

        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        trace!(function = name, depth = self.depth + 1, "calling");

        let previous = self.env.enter();
        for (param, value) in def.params.iter().zip(values) {
            self.env.declare(&param.name, value);
        }

        self.depth += 1;
        let result = self.exec_block(&def.body);
        self.depth -= 1;
        self.env.leave(previous);

        let outcome = match result {
            Ok(Flow::Normal) => Ok(Value::Void),
            Ok(Flow::Return(value)) => Ok(value),
            Ok(Flow::Break(location)) => Err(RuntimeError::BreakOutsideLoop { location }),
            Err(error) => Err(error),
        };
        if outcome.is_err() && self.fault.is_none() {
            self.fault = Some(def);
        }
        outcome
    }

    /// Runs a built-in on already evaluated arguments.
    ///
    /// ## Errors
    /// - `RuntimeError::ArgumentCountMismatch` if `args` does not match the
    ///   built-in's arity.
    /// - `RuntimeError::InvalidInteger` if `read_int` reads something other
    ///   than an integer.
    /// - `RuntimeError::Io` if the console cannot be read or written.
    pub fn call_builtin(&mut self,
                        builtin: Builtin,
                        args: &[Value],
                        location: Location)
                        -> EvalResult<Value> {
        if args.len() != builtin.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { name: builtin.name().to_string(),
                                                             expected: builtin.arity(),
                                                             found: args.len(),
                                                             location });
        }

        match builtin {
            Builtin::Print => {
                writeln!(self.output_mut(), "{}", args[0])?;
                Ok(Value::Void)
            },
            Builtin::Output => {
                write!(self.output_mut(), "{}", args[0])?;
                self.output_mut().flush()?;
                Ok(Value::Void)
            },
            Builtin::ReadString => Ok(Value::Str(self.read_line()?)),
            Builtin::ReadInt => {
                let line = self.read_line()?;
                let input = line.trim();
                input.parse()
                     .map(Value::Integer)
                     .map_err(|_| RuntimeError::InvalidInteger { input: input.to_string(),
                                                                 location })
            },
        }
    }

    /// Reads one line of input without its line terminator.
    ///
    /// Yields an empty string at end of input. Pending output is flushed
    /// first so prompts written with `output` appear before the read blocks.
    fn read_line(&mut self) -> EvalResult<String> {
        self.output_mut().flush()?;

        let mut line = String::new();
        self.input_mut().read_line(&mut line)?;

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::parse};

    fn run_with_input(source: &str, input: &'static str) -> Result<String, RuntimeError> {
        let tokens = tokenize(source, "<test>").unwrap();
        let program = parse(&tokens, "<test>").unwrap();
        let mut interpreter = Interpreter::with_io(input.as_bytes(), Vec::new());
        interpreter.run(&program)?;
        Ok(String::from_utf8(interpreter.into_output()).unwrap())
    }

    #[test]
    fn return_inside_a_loop_leaves_the_call() {
        let source = "function f() -> int do
                          let i: int = 0
                          while true do
                              i = i + 1
                              if i == 3 do return i end
                          end
                          return -1
                      end
                      print(f())";

        assert_eq!(run_with_input(source, "").unwrap(), "3\n");
    }

    #[test]
    fn functions_see_the_callers_bindings() {
        let source = "function show() -> void do print(x) end
                      do let x: int = 7 show() end";

        assert_eq!(run_with_input(source, "").unwrap(), "7\n");
    }

    #[test]
    fn reads_strip_the_line_terminator() {
        let source = "let name: string = read_string()
                      let n: int = read_int()
                      print(name)
                      print(n + 1)";

        assert_eq!(run_with_input(source, "Ada\r\n  41 \n").unwrap(), "Ada\n42\n");
    }

    #[test]
    fn read_string_at_end_of_input_is_empty() {
        assert_eq!(run_with_input(r#"print(read_string() == "")"#, "").unwrap(), "true\n");
    }

    #[test]
    fn read_int_rejects_other_input() {
        let err = run_with_input("print(read_int())", "forty two\n").unwrap_err();

        assert_eq!(err.to_string(), "read_int got non-integer input \"forty two\"");
    }

    #[test]
    fn unbounded_recursion_is_stopped() {
        let source = "function down(n: int) -> int do return down(n + 1) end
                      print(down(0))";

        let err = std::thread::Builder::new().stack_size(64 * 1024 * 1024)
                                             .spawn(move || run_with_input(source, "").unwrap_err())
                                             .unwrap()
                                             .join()
                                             .unwrap();
        assert!(matches!(err, RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH, .. }));
    }

    #[test]
    fn break_cannot_escape_a_call() {
        let source = "function f() -> void do break end
                      while true do f() end";

        let err = run_with_input(source, "").unwrap_err();
        assert!(matches!(err, RuntimeError::BreakOutsideLoop { .. }));
    }

    #[test]
    fn failures_remember_the_innermost_function() {
        let mut interpreter = Interpreter::with_io("".as_bytes(), Vec::new());
        let mut run = |source: &str| {
            let tokens = tokenize(source, "<test>").unwrap();
            interpreter.run(&parse(&tokens, "<test>").unwrap()).unwrap_err();
            interpreter.failed_in().map(|def| def.name.clone())
        };

        let source = "function inner() -> int do return 1 / 0 end
                      function outer() -> int do return inner() end
                      print(outer())";
        assert_eq!(run(source), Some("inner".to_string()));
        assert_eq!(run("print(1 / 0)"), None);
    }
}

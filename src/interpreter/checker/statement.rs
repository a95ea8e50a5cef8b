use crate::{
    ast::{Block, Expr, FunctionDef, Location, Statement, Type},
    error::TypeError,
    interpreter::checker::{
        core::{CheckResult, TypeChecker},
        scope::Signature,
    },
};

impl TypeChecker {
    /// Checks statements in order in the current scope.
    pub(in crate::interpreter::checker) fn check_statements(&mut self,
                                                            statements: &[Statement])
                                                            -> CheckResult<()> {
        statements.iter()
                  .try_for_each(|statement| self.check_statement(statement))
    }

    /// Checks a single statement.
    ///
    /// Declarations bind in the current scope once their initializer checks,
    /// so `let x: int = x + 1` reads an outer `x`. Function signatures are
    /// bound before the body is checked, which lets a function call itself;
    /// a function defined further down is not visible yet.
    pub fn check_statement(&mut self, statement: &Statement) -> CheckResult<()> {
        match statement {
            Statement::VariableDeclaration { name,
                                             ty,
                                             value,
                                             location, } => {
                let found = self.check_expr(value)?;
                if found != *ty {
                    return Err(TypeError::Mismatch { expected: *ty,
                                                     found,
                                                     location: *location });
                }
                self.scopes.declare_variable(name, *ty);
                Ok(())
            },
            Statement::Assignment { name,
                                    value,
                                    location, } => {
                let expected =
                    self.scopes
                        .variable(name)
                        .ok_or_else(|| TypeError::AssignmentToUndeclared { name:     name.clone(),
                                                                           location: *location, })?;
                let found = self.check_expr(value)?;
                if found != expected {
                    return Err(TypeError::Mismatch { expected,
                                                     found,
                                                     location: *location });
                }
                Ok(())
            },
            Statement::If { condition,
                            then_block,
                            else_block,
                            location, } => {
                self.check_condition("if", condition, *location)?;
                self.check_block(then_block)?;
                else_block.as_ref()
                          .map_or(Ok(()), |block| self.check_block(block))
            },
            Statement::While { condition,
                               body,
                               location, } => {
                self.check_condition("while", condition, *location)?;
                self.check_block(body)
            },
            Statement::Block(block) => self.check_block(block),
            Statement::Function(def) => self.check_function(def),
            Statement::Return { value, .. } => {
                if let Some(value) = value {
                    self.check_expr(value)?;
                }
                Ok(())
            },
            Statement::Print { expr, .. }
            | Statement::Output { expr, .. }
            | Statement::Expression { expr, .. } => self.check_expr(expr).map(|_| ()),
            Statement::Break { .. } => Ok(()),
        }
    }

    /// Checks a block in a fresh child scope, discarded afterwards.
    fn check_block(&mut self, block: &Block) -> CheckResult<()> {
        let previous = self.scopes.enter();
        let result = self.check_statements(&block.statements);
        self.scopes.leave(previous);
        result
    }

    fn check_condition(&mut self,
                       construct: &'static str,
                       condition: &Expr,
                       location: Location)
                       -> CheckResult<()> {
        match self.check_expr(condition)? {
            Type::Bool => Ok(()),
            found => Err(TypeError::Condition { construct,
                                                found,
                                                location }),
        }
    }

    /// Registers the signature of `def` in the current scope, then checks its
    /// body with the parameters bound in a child scope.
    ///
    /// Return statements are checked as expressions only; whether every path
    /// returns a value of the declared type is not verified.
    fn check_function(&mut self, def: &FunctionDef) -> CheckResult<()> {
        self.scopes.declare_function(&def.name, Signature::from(def));

        let previous = self.scopes.enter();
        for param in &def.params {
            self.scopes.declare_variable(&param.name, param.ty);
        }
        let result = self.check_statements(&def.body.statements);
        self.scopes.leave(previous);

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Diagnostic,
        interpreter::{checker::check, lexer::tokenize, parser::parse},
    };

    fn check_source(source: &str) -> Result<(), Diagnostic> {
        let tokens = tokenize(source, "test").unwrap();
        check(&parse(&tokens, "test").unwrap(), "test")
    }

    fn message(source: &str) -> String {
        check_source(source).unwrap_err().message
    }

    #[test]
    fn block_declarations_do_not_leak() {
        assert_eq!(message("do let x: int = 1 end\nprint(x)"),
                   "Undeclared variable 'x'");
    }

    #[test]
    fn assignments_keep_the_declared_type() {
        assert_eq!(message("let a: int = 3\na = \"s\""), "Cannot assign string to int");
        assert_eq!(message("b = 1"), "Variable 'b' not declared");
        assert!(check_source("let a: int = 3\ndo let a: string = \"s\"\na = \"t\" end").is_ok());
    }

    #[test]
    fn operators_check_their_operands() {
        assert_eq!(message("print(1 + true)"),
                   "Operator '+' requires int operands, found int and bool");
        assert_eq!(message("print(1 < \"a\")"),
                   "Operator '<' requires int operands, found int and string");
        assert_eq!(message("print(1 == \"a\")"),
                   "Operator '==' requires operands of the same type, found int and string");
        assert_eq!(message("print(1 or true)"),
                   "Operator 'or' requires bool operands, found int and bool");
        assert_eq!(message("print(-\"a\")"), "Unary '-' requires an int operand, found string");
        assert!(check_source("print(\"a\" != \"b\" and true == false)").is_ok());
    }

    #[test]
    fn conditions_must_be_bool() {
        assert_eq!(message("if 1 do print(1) end"), "if condition must be bool, found int");
        assert_eq!(message("while \"x\" do break end"),
                   "while condition must be bool, found string");
    }

    #[test]
    fn calls_check_arity_and_argument_types() {
        let add = "function add(a: int, b: int) -> int do return a + b end\n";

        assert_eq!(message(&format!("{add}print(add(1))")),
                   "Function 'add' expects 2 argument(s), found 1");
        assert_eq!(message(&format!("{add}print(add(1, \"2\"))")),
                   "Argument 2 of 'add' must be int, found string");
        assert_eq!(message(&format!("{add}let s: string = add(1, 2)")),
                   "Cannot assign int to string");
        assert!(check_source(&format!("{add}let n: int = add(1, 2)")).is_ok());
    }

    #[test]
    fn functions_are_visible_from_their_definition_on() {
        assert!(check_source("function f(n: int) -> int do return f(n - 1) end").is_ok());
        assert_eq!(message("print(g())\nfunction g() -> int do return 1 end"),
                   "Undefined function 'g'");
    }

    #[test]
    fn parameters_are_scoped_to_the_body() {
        assert_eq!(message("function f(n: int) do print(n) end\nprint(n)"),
                   "Undeclared variable 'n'");
    }

    #[test]
    fn errors_carry_locations() {
        let error = check_source("let a: int = 1\nprint(a + b)").unwrap_err();

        assert_eq!(error.to_string(), "test:2:11: TypeError: Undeclared variable 'b'");
    }
}

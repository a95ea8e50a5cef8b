use crate::{
    ast::{BinaryOperator, Expr, Location, Type, UnaryOperator},
    error::TypeError,
    interpreter::{
        builtin::Builtin,
        checker::core::{CheckResult, TypeChecker},
    },
};

impl TypeChecker {
    /// Resolves the static type of an expression.
    ///
    /// Dispatches on the expression variant. Operator rules are listed on
    /// [`TypeChecker::check_binary`].
    pub fn check_expr(&mut self, expr: &Expr) -> CheckResult<Type> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.ty()),
            Expr::Variable { name, location } => {
                self.scopes
                    .variable(name)
                    .ok_or_else(|| TypeError::UndeclaredVariable { name:     name.clone(),
                                                                   location: *location, })
            },
            Expr::UnaryOp { op, expr, location } => {
                let ty = self.check_expr(expr)?;
                Self::check_unary(*op, ty, *location)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             location, } => {
                let left = self.check_expr(left)?;
                let right = self.check_expr(right)?;
                Self::check_binary(*op, left, right, *location)
            },
            Expr::Call { name,
                         arguments,
                         location, } => self.check_call(name, arguments, *location),
            Expr::ReadInput { kind, .. } => Ok(Builtin::from(*kind).return_type()),
        }
    }

    /// `+` and `-` take an `int` and yield an `int`.
    fn check_unary(op: UnaryOperator, ty: Type, location: Location) -> CheckResult<Type> {
        match (op, ty) {
            (UnaryOperator::Plus | UnaryOperator::Negate, Type::Int) => Ok(Type::Int),
            (op, found) => Err(TypeError::UnaryOperand { op,
                                                         found,
                                                         location }),
        }
    }

    /// Applies the operand rules of binary operators.
    ///
    /// - `and`, `or`: `bool` operands, `bool` result.
    /// - `+ - * /`: `int` operands, `int` result.
    /// - `< <= > >=`: `int` operands, `bool` result.
    /// - `== !=`: operands of the same type, `bool` result.
    ///
    /// ## Example
    /// ```
    /// use azhar::{
    ///     ast::{BinaryOperator, Location, Type},
    ///     interpreter::checker::TypeChecker,
    /// };
    ///
    /// let at = Location::new(1, 3);
    ///
    /// assert_eq!(TypeChecker::check_binary(BinaryOperator::Less, Type::Int, Type::Int, at),
    ///            Ok(Type::Bool));
    /// assert_eq!(TypeChecker::check_binary(BinaryOperator::Equal, Type::String, Type::String, at),
    ///            Ok(Type::Bool));
    ///
    /// let error = TypeChecker::check_binary(BinaryOperator::And, Type::Int, Type::Bool, at);
    /// assert_eq!(error.unwrap_err().to_string(),
    ///            "Operator 'and' requires bool operands, found int and bool");
    /// ```
    pub fn check_binary(op: BinaryOperator,
                        left: Type,
                        right: Type,
                        location: Location)
                        -> CheckResult<Type> {
        let (result, requirement) = if op.is_logical() {
            ((left == Type::Bool && right == Type::Bool).then_some(Type::Bool), "bool operands")
        } else if op.is_arithmetic() {
            ((left == Type::Int && right == Type::Int).then_some(Type::Int), "int operands")
        } else if op.is_relational() {
            ((left == Type::Int && right == Type::Int).then_some(Type::Bool), "int operands")
        } else {
            ((left == right).then_some(Type::Bool), "operands of the same type")
        };

        result.ok_or(TypeError::BinaryOperands { op,
                                                 requirement,
                                                 left,
                                                 right,
                                                 location })
    }

    /// Checks a call against the built-in table first, then against the user
    /// signatures visible in the scope chain.
    ///
    /// Arguments must match the parameters in number, and for user functions
    /// in type, position by position. Built-ins accept arguments of any type.
    fn check_call(&mut self,
                  name: &str,
                  arguments: &[Expr],
                  location: Location)
                  -> CheckResult<Type> {
        if let Some(builtin) = Builtin::lookup(name) {
            Self::check_arity(name, builtin.arity(), arguments.len(), location)?;
            for argument in arguments {
                self.check_expr(argument)?;
            }
            return Ok(builtin.return_type());
        }

        let signature =
            self.scopes
                .function(name)
                .ok_or_else(|| TypeError::UndefinedFunction { name: name.to_string(),
                                                              location })?;

        Self::check_arity(name, signature.params.len(), arguments.len(), location)?;

        for (position, (argument, (_, expected))) in
            arguments.iter().zip(&signature.params).enumerate()
        {
            let found = self.check_expr(argument)?;
            if found != *expected {
                return Err(TypeError::ArgumentType { name: name.to_string(),
                                                     position: position + 1,
                                                     expected: *expected,
                                                     found,
                                                     location: argument.location() });
            }
        }

        Ok(signature.return_type)
    }

    fn check_arity(name: &str,
                   expected: usize,
                   found: usize,
                   location: Location)
                   -> CheckResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(TypeError::ArgumentCount { name: name.to_string(),
                                           expected,
                                           found,
                                           location })
        }
    }
}

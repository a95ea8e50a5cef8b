use crate::{ast::Location, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Adds two integers, failing on overflow.
///
/// ## Example
/// ```
/// use azhar::{ast::Location, util::num::add_checked};
///
/// assert_eq!(add_checked(2, 3, Location::new(1, 1)).unwrap(), 5);
/// assert!(add_checked(i64::MAX, 1, Location::new(1, 1)).is_err());
/// ```
pub fn add_checked(lhs: i64, rhs: i64, location: Location) -> EvalResult<i64> {
    lhs.checked_add(rhs)
       .ok_or(RuntimeError::Overflow { location })
}

/// Subtracts two integers, failing on overflow.
pub fn sub_checked(lhs: i64, rhs: i64, location: Location) -> EvalResult<i64> {
    lhs.checked_sub(rhs)
       .ok_or(RuntimeError::Overflow { location })
}

/// Multiplies two integers, failing on overflow.
pub fn mul_checked(lhs: i64, rhs: i64, location: Location) -> EvalResult<i64> {
    lhs.checked_mul(rhs)
       .ok_or(RuntimeError::Overflow { location })
}

/// Negates an integer, failing for `i64::MIN`.
pub fn neg_checked(value: i64, location: Location) -> EvalResult<i64> {
    value.checked_neg()
         .ok_or(RuntimeError::Overflow { location })
}

/// Integer division rounding toward negative infinity.
///
/// ## Errors
/// - `RuntimeError::DivisionByZero` if `rhs` is zero.
/// - `RuntimeError::Overflow` for `i64::MIN / -1`.
///
/// ## Example
/// ```
/// use azhar::{ast::Location, util::num::floor_div_checked};
///
/// let at = Location::new(1, 1);
///
/// assert_eq!(floor_div_checked(7, 2, at).unwrap(), 3);
/// assert_eq!(floor_div_checked(-7, 2, at).unwrap(), -4);
/// assert_eq!(floor_div_checked(7, -2, at).unwrap(), -4);
/// assert_eq!(floor_div_checked(-7, -2, at).unwrap(), 3);
/// assert!(floor_div_checked(1, 0, at).is_err());
/// ```
pub fn floor_div_checked(lhs: i64, rhs: i64, location: Location) -> EvalResult<i64> {
    if rhs == 0 {
        return Err(RuntimeError::DivisionByZero { location });
    }

    let quotient = lhs.checked_div(rhs)
                      .ok_or(RuntimeError::Overflow { location })?;

    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Location = Location::new(1, 1);

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div_checked(6, 3, AT).unwrap(), 2);
        assert_eq!(floor_div_checked(-6, 3, AT).unwrap(), -2);
        assert_eq!(floor_div_checked(-1, 2, AT).unwrap(), -1);
        assert_eq!(floor_div_checked(1, -2, AT).unwrap(), -1);
        assert_eq!(floor_div_checked(0, -5, AT).unwrap(), 0);
    }

    #[test]
    fn floor_division_reports_zero_and_overflow() {
        assert!(matches!(floor_div_checked(5, 0, AT),
                         Err(RuntimeError::DivisionByZero { .. })));
        assert!(matches!(floor_div_checked(i64::MIN, -1, AT),
                         Err(RuntimeError::Overflow { .. })));
    }

    #[test]
    fn checked_operations_report_overflow() {
        assert!(matches!(sub_checked(i64::MIN, 1, AT), Err(RuntimeError::Overflow { .. })));
        assert!(matches!(mul_checked(i64::MAX, 2, AT), Err(RuntimeError::Overflow { .. })));
        assert!(matches!(neg_checked(i64::MIN, AT), Err(RuntimeError::Overflow { .. })));
        assert_eq!(neg_checked(5, AT).unwrap(), -5);
    }
}

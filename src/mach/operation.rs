use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Integer arithmetic shared by the expression evaluator.
/// Anything that leaves the `i64` range is an `OVERFLOW`.
pub struct Operation {}

impl Operation {
    pub fn literal(n: u64) -> Result<i64> {
        match i64::try_from(n) {
            Ok(i) => Ok(i),
            Err(_) => Err(error!(Overflow)),
        }
    }

    /// A minus sign written directly on a literal, which lets the most
    /// negative `i64` be spelled out.
    pub fn negative_literal(n: u64) -> Result<i64> {
        if n == i64::max_value() as u64 + 1 {
            return Ok(i64::min_value());
        }
        Operation::negate(Operation::literal(n)?)
    }

    pub fn negate(val: i64) -> Result<i64> {
        match val.checked_neg() {
            Some(i) => Ok(i),
            None => Err(error!(Overflow)),
        }
    }

    pub fn add(lhs: i64, rhs: i64) -> Result<i64> {
        match lhs.checked_add(rhs) {
            Some(i) => Ok(i),
            None => Err(error!(Overflow)),
        }
    }

    pub fn subtract(lhs: i64, rhs: i64) -> Result<i64> {
        match lhs.checked_sub(rhs) {
            Some(i) => Ok(i),
            None => Err(error!(Overflow)),
        }
    }

    pub fn multiply(lhs: i64, rhs: i64) -> Result<i64> {
        match lhs.checked_mul(rhs) {
            Some(i) => Ok(i),
            None => Err(error!(Overflow)),
        }
    }

    /// Truncates toward zero.
    pub fn divide(lhs: i64, rhs: i64) -> Result<i64> {
        match lhs.checked_div(rhs) {
            Some(i) => Ok(i),
            None => {
                if rhs == 0 {
                    Err(error!(DivisionByZero))
                } else {
                    Err(error!(Overflow))
                }
            }
        }
    }

    /// Computed in floating point and truncated, so very large results
    /// lose their low digits.
    pub fn power(lhs: i64, rhs: i64) -> Result<i64> {
        let r = (lhs as f64).powf(rhs as f64).trunc();
        if !r.is_finite() || r < i64::min_value() as f64 || r >= i64::max_value() as f64 {
            return Err(error!(Overflow));
        }
        Ok(r as i64)
    }

    pub fn equal(lhs: i64, rhs: i64) -> i64 {
        (lhs == rhs) as i64
    }

    pub fn less(lhs: i64, rhs: i64) -> i64 {
        (lhs < rhs) as i64
    }

    pub fn greater(lhs: i64, rhs: i64) -> i64 {
        (lhs > rhs) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_truncates() {
        assert_eq!(Operation::divide(7, 2), Ok(3));
        assert_eq!(Operation::divide(-7, 2), Ok(-3));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(Operation::divide(1, 0), Err(error!(DivisionByZero)));
        assert_eq!(Operation::divide(i64::min_value(), -1), Err(error!(Overflow)));
    }

    #[test]
    fn test_power() {
        assert_eq!(Operation::power(2, 10), Ok(1024));
        assert_eq!(Operation::power(2, -1), Ok(0));
        assert_eq!(Operation::power(-3, 3), Ok(-27));
        assert_eq!(Operation::power(10, 30), Err(error!(Overflow)));
        assert_eq!(Operation::power(0, -1), Err(error!(Overflow)));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(Operation::add(i64::max_value(), 1), Err(error!(Overflow)));
        assert_eq!(Operation::negate(i64::min_value()), Err(error!(Overflow)));
        assert_eq!(Operation::literal(u64::max_value()), Err(error!(Overflow)));
        assert_eq!(Operation::negative_literal(1 << 63), Ok(i64::min_value()));
        assert_eq!(Operation::negative_literal(5), Ok(-5));
        assert_eq!(Operation::negative_literal((1 << 63) + 1), Err(error!(Overflow)));
    }

    #[test]
    fn test_comparison() {
        assert_eq!(Operation::less(1, 2), 1);
        assert_eq!(Operation::greater(1, 2), 0);
        assert_eq!(Operation::equal(3, 3), 1);
    }
}

//! Arithmetic operators used between operand cells.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// One of the four arithmetic operators a grid can contain.
///
/// Equations apply operators strictly left to right, so there is no notion of
/// precedence here: [`Operator::apply`] combines an accumulated value with the next
/// operand and nothing else.
///
/// # Examples
///
/// ```
/// use crossmath_core::Operator;
///
/// assert_eq!(Operator::Add.apply(8, 2), Some(10));
/// assert_eq!(Operator::Div.apply(8, 2), Some(4));
/// // Division must be exact.
/// assert_eq!(Operator::Div.apply(7, 2), None);
/// assert_eq!(Operator::Div.apply(7, 0), None);
///
/// let op: Operator = "*".parse()?;
/// assert_eq!(op, Operator::Mul);
/// # Ok::<(), crossmath_core::ParseOperatorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Operator {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Exact integer division (`/`).
    Div,
}

impl Operator {
    /// All operators in symbol order `+ - * /`.
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Returns the ASCII symbol of this operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Returns the operator for a symbol, if it is one.
    ///
    /// Besides the ASCII symbols, `×` and `÷` are accepted for multiplication and
    /// division.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' | '×' => Some(Self::Mul),
            '/' | '÷' => Some(Self::Div),
            _ => None,
        }
    }

    /// Combines the accumulated value with the next operand.
    ///
    /// Returns `None` when the step has no integer result: division by zero, a
    /// dividend that is not evenly divisible by the divisor, or arithmetic overflow.
    #[must_use]
    pub const fn apply(self, acc: i64, rhs: i64) -> Option<i64> {
        match self {
            Self::Add => acc.checked_add(rhs),
            Self::Sub => acc.checked_sub(rhs),
            Self::Mul => acc.checked_mul(rhs),
            Self::Div => {
                if rhs == 0 {
                    return None;
                }
                match acc.checked_rem(rhs) {
                    Some(0) => acc.checked_div(rhs),
                    _ => None,
                }
            }
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.symbol(), f)
    }
}

/// Error returned when a string is not an operator symbol.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown operator: {symbol:?}")]
pub struct ParseOperatorError {
    /// The rejected input.
    pub symbol: String,
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(op) = Self::from_symbol(c)
        {
            return Ok(op);
        }
        Err(ParseOperatorError {
            symbol: s.to_owned(),
        })
    }
}

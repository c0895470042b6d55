use std::fmt;
use std::num::NonZeroI32;
use std::ops::Neg;

use crate::error::ClauseError;

/// A signed literal: its magnitude names a variable, its sign fixes polarity.
///
/// Zero is never a valid literal: it is reserved as the clause terminator in
/// every flat encoding this crate uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Builds a literal from a raw integer, rejecting zero and `i32::MIN`
    /// (whose absolute value does not fit in `i32`, violating the `|l| <=
    /// 2^31 - 1` bound).
    pub fn new(value: i32) -> Result<Self, ClauseError> {
        if value == i32::MIN {
            return Err(ClauseError::LiteralOutOfRange);
        }
        NonZeroI32::new(value)
            .map(Literal)
            .ok_or(ClauseError::ZeroLiteral)
    }

    pub fn get(self) -> i32 {
        self.0.get()
    }

    pub fn is_positive(self) -> bool {
        self.0.get() > 0
    }

    /// The variable this literal refers to, irrespective of polarity.
    pub fn variable(self) -> u32 {
        self.0.unsigned_abs().get()
    }
}

impl Neg for Literal {
    type Output = Literal;

    fn neg(self) -> Literal {
        Literal(self.0.checked_neg().expect("literal magnitude already validated"))
    }
}

impl TryFrom<i32> for Literal {
    type Error = ClauseError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Literal::new(value)
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> i32 {
        lit.get()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

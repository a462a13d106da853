use std::{fmt, str::FromStr};

/// A non-negative decimal amount with two fractional digits.
///
/// Amounts are held as a whole number of cents. The upper bound matches the
/// range of a `DECIMAL(10,2)` column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(9_999_999_999);

    #[must_use]
    pub fn from_cents(cents: u64) -> Option<Self> {
        if cents <= Self::MAX.0 {
            Some(Self(cents))
        } else {
            None
        }
    }

    #[must_use]
    pub fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotANumber);
        }

        if value < 0.0 {
            return Err(AmountError::Negative);
        }

        let cents = (value * 100.0).round();

        if cents > Self::MAX.0 as f64 {
            return Err(AmountError::OutOfRange);
        }

        Ok(Self(cents as u64))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        match trimmed.parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => Err(AmountError::NotANumber),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must not be empty")]
    Empty,
    #[error("amount must be a decimal number")]
    NotANumber,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount must not exceed {}", Amount::MAX)]
    OutOfRange,
}

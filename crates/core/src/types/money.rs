//! Whole-naira amounts.
//!
//! Every published price is a whole number of naira, so amounts are kept as
//! integers and never pass through floating point.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// An amount of Nigerian naira.
///
/// ```
/// use bloom_haven_core::Naira;
///
/// let total = Naira::new(800) * 5 + Naira::new(2_000);
/// assert_eq!(total, Naira::new(6_000));
/// assert_eq!(total.to_string(), "₦6,000");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Naira(i64);

impl Naira {
    /// Zero naira.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole naira.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// The amount in whole naira.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Returns `self` when `include` is true, zero otherwise.
    #[must_use]
    pub const fn if_included(self, include: bool) -> Self {
        if include { self } else { Self::ZERO }
    }
}

impl fmt::Display for Naira {
    /// Formats with the naira sign and comma thousands separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}₦{grouped}")
    }
}

impl Add for Naira {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Naira {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<i64> for Naira {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Sum for Naira {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount in centavos.
///
/// The backend exchanges prices and balances as JSON decimal numbers
/// (`4.5` meaning R$ 4,50). Amounts are held as integer centavos here so that
/// cart totals and balance checks never accumulate float error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount accepted from input or the wire: R$ 100 billion.
    pub const MAX: Money = Money(10_000_000_000_000);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Convert a decimal amount in reais, rounding to the nearest centavo.
    /// Values beyond [`Money::MAX`] in either direction are clamped.
    pub fn from_reais(reais: f64) -> Self {
        let cents = (reais * 100.0).round() as i64;
        Money(cents.clamp(-Self::MAX.0, Self::MAX.0))
    }

    /// Like [`Money::from_reais`], but `None` for values that are not finite
    /// or lie beyond [`Money::MAX`].
    pub fn try_from_reais(reais: f64) -> Option<Self> {
        let cents = (reais * 100.0).round();
        if !cents.is_finite() || cents.abs() > Self::MAX.0 as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn as_reais(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parse user input such as `"12"`, `"12.5"` or `"12,50"`.
    pub fn parse(input: &str) -> Option<Money> {
        let normalized = input.trim().replace(',', ".");
        if normalized.is_empty() {
            return None;
        }
        let value: f64 = normalized.parse().ok()?;
        Money::try_from_reais(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}R$ {}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

// On the wire money is a plain JSON number in reais.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_reais())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::try_from_reais(value)
            .ok_or_else(|| serde::de::Error::custom(format!("money amount out of range: {value}")))
    }
}

/// Format an amount for display, e.g. `R$ 4.50`.
pub fn format_amount(amount: Money) -> String {
    amount.to_string()
}

use std::fmt;

/// Money amount represented as **integer cents**.
///
/// Use this type for **all** monetary arithmetic in the engine (prices,
/// balances, discounts) to avoid floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns `percent`% of this amount, truncated to whole cents.
    #[must_use]
    pub const fn percent(self, percent: i64) -> Money {
        Money(self.0 * percent / 100)
    }

    /// Clamps this amount into `[Money::ZERO, cap]`.
    ///
    /// Used for discount amounts, which may never exceed the subtotal nor go
    /// negative.
    #[must_use]
    pub fn clamp_to(self, cap: Money) -> Money {
        Money(self.0.clamp(0, cap.0.max(0)))
    }

    /// Subtraction floored at zero.
    #[must_use]
    pub fn saturating_sub_floor(self, rhs: Money) -> Money {
        Money((self.0 - rhs.0).max(0))
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn percent_truncates_to_whole_cents() {
        assert_eq!(Money::new(7000).percent(10), Money::new(700));
        assert_eq!(Money::new(999).percent(10), Money::new(99));
        assert_eq!(Money::new(100).percent(0), Money::ZERO);
    }

    #[test]
    fn clamp_to_caps_and_floors() {
        assert_eq!(Money::new(5000).clamp_to(Money::new(3000)), Money::new(3000));
        assert_eq!(Money::new(2000).clamp_to(Money::new(3000)), Money::new(2000));
        assert_eq!(Money::new(-100).clamp_to(Money::new(3000)), Money::ZERO);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(
            Money::new(7000).saturating_sub_floor(Money::new(700)),
            Money::new(6300)
        );
        assert_eq!(
            Money::new(500).saturating_sub_floor(Money::new(700)),
            Money::ZERO
        );
    }
}

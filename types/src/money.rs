//! Exact GBP arithmetic in integer pence.
//!
//! The console works in pounds with two decimal places and rounds half up at
//! each derivation step. Keeping amounts in integer pence makes that rounding
//! exact instead of drifting through binary floats. On the wire a [`Money`]
//! value is a JSON number in pounds (`12.34`; whole pounds as `18`), which
//! keeps exported menus human-readable.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// An amount of money in pence. Supports the handful of operations order
/// pricing needs: addition, quantity multiplication, and half-up percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn from_pence(pence: i64) -> Self {
        Self(pence)
    }

    #[must_use]
    pub const fn from_pounds(pounds: i64) -> Self {
        Self(pounds * 100)
    }

    #[must_use]
    pub const fn pence(self) -> i64 {
        self.0
    }

    /// `pct` percent of this amount, rounded half up to the nearest penny.
    /// Amounts are non-negative in practice; truncation is floor here.
    #[must_use]
    pub const fn percent(self, pct: i64) -> Money {
        Money((self.0 * pct + 50) / 100)
    }

    /// Round to the nearest 10p, half up. Seeded menu variants price this way.
    #[must_use]
    pub const fn round_to_ten_pence(self) -> Money {
        Money((self.0 + 5) / 10 * 10)
    }

    #[must_use]
    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, qty: u32) -> Money {
        Money(self.0 * i64::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}£{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole pounds print without a fraction, the console's export shape.
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pounds = f64::deserialize(deserializer)?;
        Ok(Money((pounds * 100.0).round() as i64))
    }
}

/// Derived financials of an order. One rule everywhere: 10% service charge on
/// the subtotal, 20% VAT on subtotal plus service, each rounded half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub service_charge: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderTotals {
    pub const SERVICE_CHARGE_PCT: i64 = 10;
    pub const VAT_PCT: i64 = 20;

    /// Totals over `(unit price, quantity)` pairs.
    #[must_use]
    pub fn from_lines<I>(lines: I) -> OrderTotals
    where
        I: IntoIterator<Item = (Money, u32)>,
    {
        let subtotal: Money = lines.into_iter().map(|(unit, qty)| unit * qty).sum();
        let service_charge = subtotal.percent(Self::SERVICE_CHARGE_PCT);
        let tax = (subtotal + service_charge).percent(Self::VAT_PCT);
        OrderTotals {
            subtotal,
            service_charge,
            tax,
            total: subtotal + service_charge + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_pounds() {
        assert_eq!(Money::from_pence(1234).to_string(), "£12.34");
        assert_eq!(Money::from_pence(600).to_string(), "£6.00");
        assert_eq!(Money::from_pence(5).to_string(), "£0.05");
        assert_eq!(Money::from_pence(-150).to_string(), "-£1.50");
    }

    #[test]
    fn percent_rounds_half_up() {
        // 10% of £12.34 = £1.234 -> £1.23
        assert_eq!(Money::from_pence(1234).percent(10), Money::from_pence(123));
        // 10% of £12.35 = £1.235 -> £1.24
        assert_eq!(Money::from_pence(1235).percent(10), Money::from_pence(124));
        // 20% of £8.36 = £1.672 -> £1.67
        assert_eq!(Money::from_pence(836).percent(20), Money::from_pence(167));
    }

    #[test]
    fn round_to_ten_pence_half_up() {
        assert_eq!(Money::from_pence(1944).round_to_ten_pence().pence(), 1940);
        assert_eq!(Money::from_pence(1945).round_to_ten_pence().pence(), 1950);
        assert_eq!(Money::from_pence(1946).round_to_ten_pence().pence(), 1950);
    }

    #[test]
    fn totals_formula() {
        // Two mains: £38 + £28 = £66; service £6.60; VAT on £72.60 = £14.52.
        let totals = OrderTotals::from_lines([
            (Money::from_pounds(38), 1),
            (Money::from_pounds(28), 1),
        ]);
        assert_eq!(totals.subtotal, Money::from_pence(6600));
        assert_eq!(totals.service_charge, Money::from_pence(660));
        assert_eq!(totals.tax, Money::from_pence(1452));
        assert_eq!(totals.total, Money::from_pence(8712));
    }

    #[test]
    fn totals_respect_quantity() {
        let totals = OrderTotals::from_lines([(Money::from_pence(750), 3)]);
        assert_eq!(totals.subtotal, Money::from_pence(2250));
        assert_eq!(totals.service_charge, Money::from_pence(225));
        // 20% of £24.75 = £4.95
        assert_eq!(totals.tax, Money::from_pence(495));
        assert_eq!(totals.total, Money::from_pence(2970));
    }

    #[test]
    fn empty_lines_are_zero() {
        let totals = OrderTotals::from_lines(core::iter::empty());
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn serde_uses_pounds() {
        let json = serde_json::to_string(&Money::from_pence(1234)).unwrap();
        assert_eq!(json, "12.34");
        let back: Money = serde_json::from_str("12.34").unwrap();
        assert_eq!(back, Money::from_pence(1234));
        let whole: Money = serde_json::from_str("18").unwrap();
        assert_eq!(whole, Money::from_pounds(18));
    }

    #[test]
    fn whole_pounds_serialize_without_a_fraction() {
        assert_eq!(serde_json::to_string(&Money::from_pounds(18)).unwrap(), "18");
        assert_eq!(serde_json::to_string(&Money::ZERO).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Money::from_pence(1330)).unwrap(), "13.3");
        let back: Money = serde_json::from_str("18").unwrap();
        assert_eq!(back, Money::from_pounds(18));
    }
}

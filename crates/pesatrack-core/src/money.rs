//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices:                                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer cents                                            │
//! │    "Kshs. 100" → 10000 cents, "99.5" → 9950 cents                       │
//! │    Totals, tender and balance never touch a float                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Parsing
//! The catalog backends disagree on how a price looks on the wire: some send
//! `"Kshs. 100"`, some `100`, some `"99.50"`. [`Money::parse`] and
//! [`Money::from_json`] accept all of them so nothing downstream has to care.
//!
//! ## Usage
//! ```rust
//! use pesatrack_core::money::Money;
//!
//! let price = Money::parse("Kshs. 100").unwrap();
//! assert_eq!(price.cents(), 10000);
//!
//! let line_total = price * 2;
//! assert_eq!(line_total.to_string(), "Kshs. 200.00");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::DEFAULT_CURRENCY_PREFIX;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total
///                                               │
///                                 Cart.total ◄──┘
///                                      │
///                  Checkout: received − total = balance
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use pesatrack_core::money::Money;
    /// assert_eq!(Money::from_major(250).cents(), 25000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a line quantity, saturating at the
    /// `i64` bounds instead of overflowing.
    ///
    /// ```rust
    /// use pesatrack_core::money::Money;
    ///
    /// let unit_price = Money::from_major(50);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_major(150));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Parses an amount as typed by a cashier or sent by a backend.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "100"            → 100.00
    /// "99.5"           → 99.50
    /// "Kshs. 100"      → 100.00   (currency prefix stripped)
    /// "KES 1,250.00"   → 1250.00  (thousands separators dropped)
    /// "-5.50"          → -5.50
    /// "12.345"         → 12.35    (third decimal rounds half up)
    /// ""  "abc"  "."   → None
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        let trimmed = input.trim();
        let number_start = trimmed
            .find(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
            .unwrap_or(trimmed.len());

        // A bare leading "." is a decimal point, not the tail of "Kshs."
        let (prefix, number) = trimmed.split_at(number_start);
        let number = if prefix == "." {
            trimmed
        } else {
            number
        };

        let cleaned: String = number
            .chars()
            .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
            .collect();

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return None;
        }

        let whole_value: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let mut digits = fraction.chars().map(|c| c as i64 - '0' as i64);
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

        let mut cents = whole_value.checked_mul(100)?.checked_add(tenths * 10 + hundredths)?;
        if round_up {
            cents = cents.checked_add(1)?;
        }

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Reads an amount out of an arbitrary JSON value.
    ///
    /// Numbers and strings are both accepted; anything else is `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Money> {
        match value {
            serde_json::Value::Number(n) => Money::parse(&n.to_string()),
            serde_json::Value::String(s) => Money::parse(s),
            _ => None,
        }
    }

    /// Formats the amount with the given currency prefix.
    ///
    /// ```rust
    /// use pesatrack_core::money::Money;
    /// assert_eq!(Money::from_cents(12550).format_with("KES"), "KES 125.50");
    /// ```
    pub fn format_with(&self, prefix: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{} {}.{:02}", sign, prefix, self.major().unsigned_abs(), self.minor_part())
    }

    /// Plain decimal rendering, no prefix ("250.00").
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().unsigned_abs(), self.minor_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_CURRENCY_PREFIX))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Wire Helpers
// =============================================================================

/// Serde adapters for amounts on the backend wire.
///
/// Backends send amounts as numbers or currency strings and expect numbers
/// back, so these are used with `#[serde(with = "...")]` on wire structs
/// instead of the cent-based derive.
pub mod wire {
    use super::*;
    use serde::de::Error as _;

    /// Deserializes a required amount from a number or string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Money::from_json(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", value)))
    }

    /// Serializes as a JSON number in major units (e.g. `99.5`).
    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The PHP endpoints run the value through floatval(); two decimals
        // survive the round trip.
        serializer.serialize_f64(money.cents() as f64 / 100.0)
    }

    /// Optional variant: missing, null or unparseable becomes `None`.
    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<serde_json::Value>::deserialize(deserializer)?;
            Ok(value.as_ref().and_then(Money::from_json))
        }

        pub fn serialize<S>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match money {
                Some(m) => super::serialize(m, serializer),
                None => serializer.serialize_none(),
            }
        }
    }

    /// Lenient variant: missing, null or unparseable becomes zero.
    pub mod or_zero {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(super::option::deserialize(deserializer)?.unwrap_or_default())
        }

        pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            super::serialize(money, serializer)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(10000).to_string(), "Kshs. 100.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-Kshs. 5.50");
        assert_eq!(Money::zero().to_string(), "Kshs. 0.00");
        assert_eq!(Money::from_cents(25005).to_decimal_string(), "250.05");
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(Money::parse("100"), Some(Money::from_major(100)));
        assert_eq!(Money::parse("99.5"), Some(Money::from_cents(9950)));
        assert_eq!(Money::parse("0.05"), Some(Money::from_cents(5)));
        assert_eq!(Money::parse(".5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse("  300 "), Some(Money::from_major(300)));
        assert_eq!(Money::parse("-5.50"), Some(Money::from_cents(-550)));
    }

    #[test]
    fn test_parse_currency_prefixed() {
        assert_eq!(Money::parse("Kshs. 100"), Some(Money::from_major(100)));
        assert_eq!(Money::parse("Kshs.50"), Some(Money::from_major(50)));
        assert_eq!(Money::parse("KES 1,250.00"), Some(Money::from_major(1250)));
    }

    #[test]
    fn test_parse_rounds_third_decimal() {
        assert_eq!(Money::parse("12.345"), Some(Money::from_cents(1235)));
        assert_eq!(Money::parse("12.344"), Some(Money::from_cents(1234)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("Kshs."), None);
        assert_eq!(Money::parse("12a"), None);
        assert_eq!(Money::parse("1.2.3"), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Money::from_json(&serde_json::json!(100)), Some(Money::from_major(100)));
        assert_eq!(Money::from_json(&serde_json::json!(99.5)), Some(Money::from_cents(9950)));
        assert_eq!(
            Money::from_json(&serde_json::json!("Kshs. 50")),
            Some(Money::from_major(50))
        );
        assert_eq!(Money::from_json(&serde_json::json!(null)), None);
        assert_eq!(Money::from_json(&serde_json::json!([1])), None);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_major(100);
        let b = Money::from_major(50);

        assert_eq!(a + b, Money::from_major(150));
        assert_eq!(a - b, Money::from_major(50));
        assert_eq!(a * 2, Money::from_major(200));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_major(200));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(999), Money::from_cents(i64::MAX));
        assert_eq!(huge * 3, Money::from_cents(i64::MAX));
        assert_eq!([huge, huge, huge].iter().sum::<Money>(), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));

        // Extremes still render
        assert!(Money::from_cents(i64::MIN).to_string().starts_with("-Kshs. "));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(Money::parse("92233720368547758.07"), Some(Money::from_cents(i64::MAX)));
        assert_eq!(Money::parse("92233720368547758.075"), None);
        assert_eq!(Money::parse("999999999999999999999"), None);
    }

    #[test]
    fn test_wire_roundtrip_through_struct() {
        #[derive(Deserialize, Serialize)]
        struct Row {
            #[serde(with = "wire")]
            price: Money,
            #[serde(default, with = "wire::option")]
            cost: Option<Money>,
        }

        let row: Row = serde_json::from_str(r#"{"price": "Kshs. 12.50"}"#).unwrap();
        assert_eq!(row.price, Money::from_cents(1250));
        assert_eq!(row.cost, None);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.5));
    }

    #[test]
    fn test_wire_rejects_unparseable_required_amount() {
        #[derive(Debug, Deserialize)]
        struct Row {
            #[serde(with = "wire")]
            #[allow(dead_code)]
            price: Money,
        }

        assert!(serde_json::from_str::<Row>(r#"{"price": "free"}"#).is_err());
    }
}

//! Money as integer paise.
//!
//! Every amount in this domain is INR, and the payment gateway's wire format
//! is paise, so money is stored as an integer count of paise end to end.
//! Floats only appear at the edges (the backend quotes JSON numbers in
//! rupees) and are converted on entry.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// An INR amount in paise (1/100 rupee).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Paise(i64);

impl Paise {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Create from a raw paise count.
    #[must_use]
    pub const fn new(paise: i64) -> Self {
        Self(paise)
    }

    /// Create from a whole-rupee amount.
    #[must_use]
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Create from a rupee amount expressed as a float (backend wire format).
    ///
    /// Rounds to the nearest paisa.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_rupees_f64(rupees: f64) -> Self {
        Self((rupees * 100.0).round() as i64)
    }

    /// The raw paise count. This is the unit the payment gateway expects.
    #[must_use]
    pub const fn as_paise(&self) -> i64 {
        self.0
    }

    /// The amount in rupees, discarding any paise remainder.
    #[must_use]
    pub const fn whole_rupees(&self) -> i64 {
        self.0 / 100
    }

    /// The amount in rupees as a float (for backend wire formats).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// The amount in rupees as a bare number string, e.g. `129999` or
    /// `129999.50` - the format used in checkout query strings and backend
    /// wire payloads.
    #[must_use]
    pub fn rupees_string(&self) -> String {
        let rupees = self.0 / 100;
        let paise = self.0 % 100;
        if paise == 0 {
            rupees.to_string()
        } else {
            format!("{}.{:02}", rupees, paise.abs())
        }
    }

    /// Format with the rupee sign and Indian digit grouping, e.g. `₹1,23,456`.
    ///
    /// Paise are shown only when non-zero: `₹1,23,456.50`.
    #[must_use]
    pub fn display(&self) -> String {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let rupees = abs / 100;
        let paise = abs % 100;

        let grouped = group_indian(rupees);
        let sign = if negative { "-" } else { "" };

        if paise == 0 {
            format!("{sign}₹{grouped}")
        } else {
            format!("{sign}₹{grouped}.{paise:02}")
        }
    }
}

/// Group a whole-rupee amount with Indian digit separators.
///
/// The last three digits form one group; every two digits after that form
/// another (lakh/crore convention): 1234567 -> "12,34,567".
fn group_indian(mut value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    let last_three = value % 1000;
    value /= 1000;

    let mut upper_groups = Vec::new();
    while value > 0 {
        upper_groups.push(value % 100);
        value /= 100;
    }

    let mut out = String::new();
    for (i, group) in upper_groups.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(&group.to_string());
        } else {
            out.push_str(&format!(",{group:02}"));
        }
    }
    out.push_str(&format!(",{last_three:03}"));
    out
}

impl fmt::Display for Paise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Add for Paise {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Paise {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Paise {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * i64::from(rhs))
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn displays_small_amounts_without_grouping() {
        assert_eq!(Paise::from_rupees(0).display(), "₹0");
        assert_eq!(Paise::from_rupees(999).display(), "₹999");
    }

    #[test]
    fn displays_indian_grouping() {
        assert_eq!(Paise::from_rupees(1_000).display(), "₹1,000");
        assert_eq!(Paise::from_rupees(89_999).display(), "₹89,999");
        assert_eq!(Paise::from_rupees(123_456).display(), "₹1,23,456");
        assert_eq!(Paise::from_rupees(1_234_567).display(), "₹12,34,567");
        assert_eq!(Paise::from_rupees(12_345_678).display(), "₹1,23,45,678");
    }

    #[test]
    fn displays_paise_remainder_only_when_nonzero() {
        assert_eq!(Paise::new(1_23_456_50).display(), "₹1,23,456.50");
        assert_eq!(Paise::new(100_05).display(), "₹100.05");
        assert_eq!(Paise::new(100_00).display(), "₹100");
    }

    #[test]
    fn displays_negative_amounts() {
        assert_eq!(Paise::from_rupees(-5_000).display(), "-₹5,000");
    }

    #[test]
    fn rupees_string_is_a_bare_number() {
        assert_eq!(Paise::from_rupees(129_999).rupees_string(), "129999");
        assert_eq!(Paise::new(12_999_950).rupees_string(), "129999.50");
        assert_eq!(Paise::new(5).rupees_string(), "0.05");
    }

    #[test]
    fn converts_float_rupees() {
        assert_eq!(Paise::from_rupees_f64(129_999.0).as_paise(), 12_999_900);
        assert_eq!(Paise::from_rupees_f64(0.335).as_paise(), 34);
        assert!((Paise::new(12_999_900).as_rupees_f64() - 129_999.0).abs() < f64::EPSILON);
    }

    #[test]
    fn arithmetic() {
        let line = Paise::from_rupees(1_500) * 3;
        assert_eq!(line, Paise::from_rupees(4_500));

        let total: Paise = [Paise::from_rupees(100), Paise::from_rupees(200)]
            .into_iter()
            .sum();
        assert_eq!(total, Paise::from_rupees(300));
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&Paise::new(12_345)).unwrap();
        assert_eq!(json, "12345");
        let parsed: Paise = serde_json::from_str("12345").unwrap();
        assert_eq!(parsed, Paise::new(12_345));
    }
}

//! Stock quantities.

use core::cmp::Ordering;
use core::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Signed, possibly fractional, amount of an item.
///
/// Whole amounts stay whole under arithmetic; a single fractional operand makes
/// the result fractional. The case survives JSON: `10` round-trips as `10` and
/// `2.5` as `2.5`.
///
/// Equality and ordering are numeric, so `Whole(8) == Fractional(8.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Quantity {
    Whole(i64),
    Fractional(f64),
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Whole(0);

    /// Build a fractional quantity, rejecting NaN and infinities.
    pub fn fractional(value: f64) -> DomainResult<Self> {
        Self::Fractional(value).validate()
    }

    /// Returns `self` if it is a usable quantity.
    ///
    /// Only fractional values can fail: NaN and infinities have no place in a
    /// stock count and cannot be written to JSON.
    pub fn validate(self) -> DomainResult<Self> {
        match self {
            Quantity::Fractional(v) if !v.is_finite() => Err(DomainError::validation(format!(
                "quantity must be a finite number, got {v}"
            ))),
            q => Ok(q),
        }
    }

    pub fn checked_add(self, rhs: Self) -> DomainResult<Self> {
        self.combine(rhs, "+", i64::checked_add, |a, b| a + b)
    }

    pub fn checked_sub(self, rhs: Self) -> DomainResult<Self> {
        self.combine(rhs, "-", i64::checked_sub, |a, b| a - b)
    }

    fn combine(
        self,
        rhs: Self,
        op: &str,
        whole: fn(i64, i64) -> Option<i64>,
        fractional: fn(f64, f64) -> f64,
    ) -> DomainResult<Self> {
        let (lhs, rhs) = (self.validate()?, rhs.validate()?);
        let result = match (lhs, rhs) {
            (Quantity::Whole(a), Quantity::Whole(b)) => whole(a, b).map(Quantity::Whole),
            (a, b) => Some(Quantity::Fractional(fractional(a.as_f64(), b.as_f64())))
                .filter(|q| q.as_f64().is_finite()),
        };
        result.ok_or_else(|| DomainError::invariant(format!("quantity overflow: {lhs} {op} {rhs}")))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Quantity::Whole(v) => v as f64,
            Quantity::Fractional(v) => v,
        }
    }

    /// Strictly greater than zero.
    pub fn is_positive(self) -> bool {
        match self {
            Quantity::Whole(v) => v > 0,
            Quantity::Fractional(v) => v > 0.0,
        }
    }
}

impl ValueObject for Quantity {}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Quantity::Whole(a), Quantity::Whole(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Whole(v) => fmt::Display::fmt(v, f),
            Quantity::Fractional(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Whole(value)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Quantity::Whole(value.into())
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity::Whole(value.into())
    }
}

/// Unchecked: NaN and infinities get through here and are rejected by
/// [`Quantity::validate`] at the point of use.
impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Fractional(value)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Quantity::Whole(v) => serializer.serialize_i64(v),
            Quantity::Fractional(v) => serializer.serialize_f64(v),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

struct QuantityVisitor;

impl Visitor<'_> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a finite number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Ok(Quantity::Whole(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(i64::try_from(v).map_or(Quantity::Fractional(v as f64), Quantity::Whole))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Quantity::fractional(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whole_arithmetic_stays_whole() {
        let q = Quantity::from(10).checked_add((-2).into()).unwrap();
        assert!(matches!(q, Quantity::Whole(8)));

        let q = q.checked_sub(20.into()).unwrap();
        assert!(matches!(q, Quantity::Whole(-12)));
    }

    #[test]
    fn fractional_operand_promotes() {
        let q = Quantity::from(3).checked_add(0.5.into()).unwrap();
        assert!(matches!(q, Quantity::Fractional(v) if v == 3.5));
        assert_eq!(q.to_string(), "3.5");
    }

    #[test]
    fn mixed_cases_compare_numerically() {
        assert_eq!(Quantity::Whole(8), Quantity::Fractional(8.0));
        assert!(Quantity::Whole(4) < Quantity::Fractional(4.5));
        assert!(Quantity::Fractional(5.0) >= Quantity::Whole(5));
    }

    #[test]
    fn whole_overflow_is_an_invariant_violation() {
        let err = Quantity::Whole(i64::MAX).checked_add(1.into()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let err = Quantity::Whole(i64::MIN).checked_sub(1.into()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn fractional_overflow_is_an_invariant_violation() {
        let err = Quantity::Fractional(f64::MAX)
            .checked_add(f64::MAX.into())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Quantity::fractional(v),
                Err(DomainError::Validation(_))
            ));
            assert!(matches!(
                Quantity::ZERO.checked_add(v.into()),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn json_keeps_the_numeric_case() {
        assert_eq!(serde_json::to_string(&Quantity::Whole(10)).unwrap(), "10");
        assert_eq!(serde_json::to_string(&Quantity::Fractional(2.5)).unwrap(), "2.5");

        let q: Quantity = serde_json::from_str("10").unwrap();
        assert!(matches!(q, Quantity::Whole(10)));
        let q: Quantity = serde_json::from_str("-2.25").unwrap();
        assert!(matches!(q, Quantity::Fractional(v) if v == -2.25));
        let q: Quantity = serde_json::from_str("18446744073709551615").unwrap();
        assert!(matches!(q, Quantity::Fractional(_)));
    }

    #[test]
    fn json_rejects_non_numbers() {
        for raw in ["\"ten\"", "null", "true", "[1]", "{}"] {
            assert!(serde_json::from_str::<Quantity>(raw).is_err(), "{raw}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Whole arithmetic agrees with i64 whenever i64 does not overflow.
        #[test]
        fn whole_add_matches_i64(a in any::<i64>(), b in any::<i64>()) {
            let q = Quantity::Whole(a).checked_add(Quantity::Whole(b));
            match a.checked_add(b) {
                Some(sum) => prop_assert!(matches!(q, Ok(Quantity::Whole(v)) if v == sum)),
                None => prop_assert!(q.is_err()),
            }
        }
    }
}

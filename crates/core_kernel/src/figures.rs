//! Derived figure value types
//!
//! Analyses produce percentages and period-over-period deltas. A relative
//! delta against a zero base is mathematically infinite; that case is a
//! dedicated enum variant so it survives serialization as the recognizable
//! `"Infinity"` sentinel instead of a bare numeric literal. Finite values
//! keep rust_decimal's standard representation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sentinel string used on the wire for an infinite relative change
const INFINITY_SENTINEL: &str = "Infinity";

/// A relative period-over-period change, in percent
///
/// `Finite(12.5)` means +12.5%. `Infinite` marks a figure that appeared
/// from a zero base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeChange {
    Finite(Decimal),
    Infinite,
}

impl RelativeChange {
    /// Computes the relative change from `base` to `analysis`
    ///
    /// `(analysis / base - 1) * 100` when the base is nonzero. A zero base
    /// yields `Infinite` when the analysis amount is positive and a flat
    /// zero otherwise.
    pub fn between(base: Decimal, analysis: Decimal) -> Self {
        if base.is_zero() {
            if analysis > Decimal::ZERO {
                RelativeChange::Infinite
            } else {
                RelativeChange::Finite(Decimal::ZERO)
            }
        } else {
            RelativeChange::Finite((analysis / base - Decimal::ONE) * dec!(100))
        }
    }

    /// Returns true for the infinite sentinel
    pub fn is_infinite(&self) -> bool {
        matches!(self, RelativeChange::Infinite)
    }

    /// Returns the finite percentage, if any
    pub fn as_finite(&self) -> Option<Decimal> {
        match self {
            RelativeChange::Finite(value) => Some(*value),
            RelativeChange::Infinite => None,
        }
    }

    /// Qualitative sign of this change
    pub fn class(&self) -> ChangeClass {
        match self {
            RelativeChange::Infinite => ChangeClass::Positive,
            RelativeChange::Finite(value) => ChangeClass::of(*value),
        }
    }
}

impl fmt::Display for RelativeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeChange::Finite(value) => write!(f, "{}%", value.round_dp(2)),
            RelativeChange::Infinite => write!(f, "∞"),
        }
    }
}

impl Serialize for RelativeChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RelativeChange::Finite(value) => Serialize::serialize(value, serializer),
            RelativeChange::Infinite => serializer.serialize_str(INFINITY_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for RelativeChange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(Decimal),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(RelativeChange::Finite(value)),
            Repr::Text(text) if text == INFINITY_SENTINEL => Ok(RelativeChange::Infinite),
            Repr::Text(other) => Err(D::Error::custom(format!(
                "expected a number or \"{INFINITY_SENTINEL}\", got \"{other}\""
            ))),
        }
    }
}

/// Qualitative sign class attached to compared figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeClass {
    Positive,
    Negative,
    Zero,
}

impl ChangeClass {
    /// Classifies a signed value
    pub fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            ChangeClass::Positive
        } else if value < Decimal::ZERO {
            ChangeClass::Negative
        } else {
            ChangeClass::Zero
        }
    }
}

impl fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeClass::Positive => "positive",
            ChangeClass::Negative => "negative",
            ChangeClass::Zero => "zero",
        };
        write!(f, "{label}")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The finite law: relative change recomputes from its inputs.
        #[test]
        fn finite_relative_change_matches_formula(
            base_cents in 1i64..1_000_000,
            analysis_cents in -1_000_000i64..1_000_000,
        ) {
            let base = Decimal::new(base_cents, 2);
            let analysis = Decimal::new(analysis_cents, 2);
            let change = RelativeChange::between(base, analysis);
            prop_assert_eq!(
                change,
                RelativeChange::Finite((analysis / base - Decimal::ONE) * dec!(100))
            );
        }

        /// Every change survives a JSON round trip unchanged.
        #[test]
        fn serde_round_trip(base_cents in 0i64..10_000, analysis_cents in 0i64..10_000) {
            let change = RelativeChange::between(
                Decimal::new(base_cents, 2),
                Decimal::new(analysis_cents, 2),
            );
            let json = serde_json::to_string(&change).unwrap();
            let back: RelativeChange = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(change, back);
        }
    }
}

//! Strongly-typed identifiers for catalog entities
//!
//! The account catalog keys its entries with plain integers. Wrapping them
//! in a newtype prevents accidental mixing with other numeric values
//! (amounts, years) in function signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an account in the catalog
///
/// Opaque: the engine never interprets the value, only uses it for
/// equality and ordering when matching accounts across periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates an account identifier from a catalog key
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying catalog key
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<AccountId> for i64 {
    fn from(id: AccountId) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = AccountId::new(42);
        let raw: i64 = id.into();
        assert_eq!(AccountId::from(raw), id);
        assert_eq!(id.to_string(), "42");
    }
}

//! Fiscal periods
//!
//! Reporting periods are identified by their year label. The ledger catalog
//! owns the set of valid periods; this type only carries the label and its
//! natural ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A fiscal year, the reporting interval of every statement in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalYear(i32);

impl FiscalYear {
    /// Creates a fiscal year from its label
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    /// Returns the year label
    pub fn year(&self) -> i32 {
        self.0
    }

    /// Returns the immediately preceding fiscal year
    ///
    /// Used by analyses that automatically compare against the prior
    /// period (DuPont, cash flow).
    pub fn previous(&self) -> Self {
        Self(self.0 - 1)
    }

    /// Returns true if `self` chronologically precedes `other`
    pub fn precedes(&self, other: &Self) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a fiscal year label
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid fiscal year label: {0}")]
pub struct FiscalYearParseError(String);

impl FromStr for FiscalYear {
    type Err = FiscalYearParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(FiscalYear)
            .map_err(|_| FiscalYearParseError(s.to_string()))
    }
}

impl From<i32> for FiscalYear {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

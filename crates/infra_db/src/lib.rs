//! Infrastructure Database Layer
//!
//! SQLx/PostgreSQL adapter for the ledger read ports. The analysis core
//! owns no schema; this crate owns exactly two read paths - period
//! resolution with the joined balance fetch, and period enumeration - and
//! maps database faults onto the core's `SourceError` taxonomy so the
//! builder can distinguish transient infrastructure failures from data
//! facts.

pub mod error;
pub mod ledger;
pub mod pool;

pub use error::DatabaseError;
pub use ledger::PostgresLedger;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};

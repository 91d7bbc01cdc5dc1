//! Derived-value computation over metric series.
pub mod aggregate;
pub mod ledger;

pub use ledger::{Derivation, DerivedLedger};

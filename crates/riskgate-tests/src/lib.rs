//! Scoring property test suite for Riskgate.
//!
//! Integration tests that drive the public engine API end to end and check
//! the score bounds, bucket boundaries and decision invariants.

pub mod helpers;

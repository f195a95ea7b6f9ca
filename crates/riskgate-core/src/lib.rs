//! # riskgate-core
//! Foundation types and traits for the Riskgate scoring service.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

//! # Perx Domain
//!
//! Wire models, configuration and the error taxonomy shared by the Perx
//! client crates.
//!
//! ## Architecture
//! - No dependencies on other Perx crates
//! - Plain data and validation only, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;

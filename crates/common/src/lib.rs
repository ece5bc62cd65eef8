//! # Perx Common
//!
//! Dependency-light utilities shared by the SDK crates.
//!
//! - [`time`]: clock abstraction with a controllable mock for TTL tests
//! - [`validation`]: field validators for caller-supplied identifiers

pub mod time;
pub mod validation;

pub use time::{Clock, MockClock, SystemClock};
pub use validation::{FieldValidator, NotBlankValidator, NumericIdValidator};

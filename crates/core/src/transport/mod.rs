//! Provider transport abstraction
//!
//! Requests are described as plain data and handed to a [`Transport`]
//! implementation living in the infra layer.

pub mod ports;

pub use ports::{ApiRequest, ApiResponse, HttpMethod, Transport};

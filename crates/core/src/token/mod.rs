//! Token acquisition and caching
//!
//! [`TokenBroker`] serves tokens from a [`TokenPool`] and falls back to a
//! [`TokenIssuer`] on a miss. User tokens are keyed by identity, the
//! application token by the fixed `application` key.

pub mod pool;
pub mod ports;
pub mod service;

pub use pool::InMemoryTokenPool;
pub use ports::{TokenIssuer, TokenPool};
pub use service::TokenBroker;

//! # Perx Core
//!
//! Provider-facing logic of the SDK, free of any HTTP stack.
//!
//! This crate contains:
//! - Port interfaces ([`Transport`], [`TokenPool`], [`TokenIssuer`])
//! - The response envelope framework
//! - Token caching and identity resolution
//! - Chunked batch execution, pagination and two-phase reservations
//! - The typed [`PerxClient`] and the user / POS façades
//!
//! ## Architecture Principles
//! - Depends only on `perx-common` and `perx-domain`
//! - All I/O goes through [`Transport`]
//! - Token storage is injected, defaulting to memory

pub mod batch;
pub mod client;
pub mod envelope;
pub mod pagination;
pub mod proxy;
pub mod reservation;
pub mod token;
pub mod transport;

pub use batch::for_each_chunked;
pub use client::PerxClient;
pub use envelope::{
    parse_and_evaluate, Envelope, ErrorFields, ListEnvelope, ObjectEnvelope, Shape,
};
pub use pagination::{collect_all_pages, Identified};
pub use proxy::{PosProxy, ProxyManager, UserProxy};
pub use reservation::{
    LoyaltyPointsReservationOps, PointsHold, ReservationOps, ReservationState,
    RewardReservationOps, TwoPhaseReservation, VoucherReservationOps,
};
pub use token::{InMemoryTokenPool, TokenBroker, TokenIssuer, TokenPool};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};

//! Shared test helpers for `perx-core` integration tests.
//!
//! Provides a scripted in-process provider so façade tests can exercise
//! token plumbing, batching and envelopes without HTTP.

pub mod provider;

pub use provider::MockProvider;

//! HTTP plumbing for the provider API

mod client;
mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::ReqwestTransport;

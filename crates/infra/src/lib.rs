//! # Perx Infrastructure
//!
//! I/O implementations of the ports defined in `perx-core`:
//! - reqwest-backed [`ReqwestTransport`]
//! - configuration loading from the environment or files
//! - tracing subscriber setup
//!
//! ```no_run
//! # async fn run() -> perx_domain::Result<()> {
//! let config = perx_infra::config::load()?;
//! let manager = perx_infra::connect(config)?;
//! let pos = manager.pos("en");
//! let _token = pos.get_token().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

use std::sync::Arc;

use perx_core::{PerxClient, ProxyManager};
use perx_domain::{PerxConfig, Result};

pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, ReqwestTransport};
pub use observability::{init_tracing, LogFormat};

/// Wire a [`ProxyManager`] to the provider described by `config`.
///
/// # Errors
/// `Config` when the config is invalid or the HTTP client cannot be built.
pub fn connect(config: PerxConfig) -> Result<ProxyManager> {
    let transport = ReqwestTransport::new(&config)?;
    tracing::info!(base_url = %config.api_root(), lang = %config.lang, "connecting to provider");
    Ok(ProxyManager::new(PerxClient::new(Arc::new(transport), config)))
}

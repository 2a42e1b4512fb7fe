//! Folio Server - HTTP query API for grounded book question answering.
//!
//! This crate is the service shell around the folio pipeline. It owns the
//! lifecycle of the injected capabilities (embedding gateway, vector index,
//! chat model), exposes the query endpoint, and maps pipeline failures to
//! stage-distinguishing HTTP errors.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - liveness probe, static "ok", no side effects
//! - `POST /query` - `{question, top_k?}` → `{answer, sources}`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;

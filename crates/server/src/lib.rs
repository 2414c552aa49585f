//! Lost & Found Server - HTTP REST API for the lost and found matching service
//!
//! This crate exposes the `lostfound` core over REST:
//!
//! - **Reports**: Submit lost/found reports and browse them with their best match
//! - **Listing**: Search, type and category filters with high-match bucketing
//! - **Chat**: Per-user conversation threads about reported items
//! - **Accounts**: Mock sign-in, sign-up and Google flows backed by sessions
//! - **Health & Metrics**: Liveness/readiness checks and Prometheus metrics
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
//!
//! # API Endpoints
//!
//! ## Public Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/auth/signin` - Sign in
//! - `POST /api/auth/signup` - Create an account
//! - `GET /api/auth/google` - Google sign-in redirect
//! - `GET /api/auth/me` - Current session user
//! - `POST /api/auth/signout` - End the session
//!
//! ## Protected Endpoints (session required)
//!
//! - `GET /api/v1/items` - Listing buckets
//! - `POST /api/v1/items` - Submit a report
//! - `GET /api/v1/items/{id}` - Item detail with its match
//! - `POST /api/v1/items/{id}/like` - Toggle like
//! - `GET /api/v1/categories` - Category options
//! - `POST /api/v1/compare` - Score breakdown for two records
//! - `GET /api/v1/chats` - Chat threads
//! - `GET /api/v1/chats/{id}` - Open a thread
//! - `POST /api/v1/chats/{id}/messages` - Send a message
//! - `GET /api/v1/metadata` - Server metadata

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

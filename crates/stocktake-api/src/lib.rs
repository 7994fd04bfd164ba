//! # stocktake-api
//!
//! HTTP API server for Stocktake.
//!
//! This crate provides the HTTP surface:
//! - RESTful product endpoints under `/api/products`
//! - Login and token verification under `/api/auth`
//! - Spreadsheet export at `/api/export`
//! - Liveness probe at `/api/health`
//! - Optional static hosting of the single-page frontend

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Error, Result};
pub use routes::build_router;
pub use server::Server;
pub use state::AppState;

//! # stocktake-cli
//!
//! Admin CLI for the Stocktake inventory server.
//!
//! - `serve`: run the HTTP API
//! - `user`: manage accounts directly in the store
//! - `config`: locate, create and inspect the config file

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config_handlers;
pub mod error;
pub mod logging;
pub mod serve;
pub mod user_handlers;

pub use error::{Error, Result};

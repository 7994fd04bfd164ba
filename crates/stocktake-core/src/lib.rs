//! Stocktake Core: shared types, validation, errors, and configuration.
//!
//! This crate provides the foundational types used across all Stocktake crates.
//! It has no internal Stocktake dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`product`]: Product records, input payloads, and validation
//! - [`user`]: User accounts and the two-tier [`Role`] model
//! - [`config`]: Layered configuration (defaults, file, environment)

pub mod config;
pub mod error;
pub mod product;
pub mod user;

// Re-export key types at crate root for convenience
pub use config::StocktakeConfig;
pub use error::{Error, Result};
pub use product::{
    NumericInput, Product, ProductFields, ProductFilter, ProductId, ProductInput, QuantityUpdate,
};
pub use user::{NewUser, PublicUser, Role, User};

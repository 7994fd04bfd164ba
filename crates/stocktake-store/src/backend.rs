//! Store traits.
//!
//! Both traits are object safe; the API holds them as `Arc<dyn ...>` so the
//! MongoDB and in-memory backends are interchangeable.
//!
//! Lookups by a malformed id return `Ok(None)` / `Ok(false)` rather than an
//! error: an id that cannot exist is simply not found.

use async_trait::async_trait;
use stocktake_core::{NewUser, Product, ProductFields, ProductFilter, ProductId, User};

use crate::Result;

/// Product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short backend name for health reporting.
    fn backend_name(&self) -> &'static str;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// List products passing `filter`, in insertion order.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>>;

    /// Fetch one product.
    async fn get(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Store a new product and return it with its assigned id.
    async fn insert(&self, fields: ProductFields) -> Result<Product>;

    /// Overwrite every editable field of an existing product.
    async fn replace(&self, id: &ProductId, fields: ProductFields) -> Result<Option<Product>>;

    /// Set only the quantity of an existing product.
    async fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<Option<Product>>;

    /// Delete a product. Returns whether anything was deleted.
    async fn delete(&self, id: &ProductId) -> Result<bool>;
}

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// All users, in insertion order.
    async fn list(&self) -> Result<Vec<User>>;

    /// Create a user. Fails with `DuplicateUsername` if the name is taken.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Delete a user. Returns whether anything was deleted.
    async fn delete_by_username(&self, username: &str) -> Result<bool>;

    /// Replace a user's password hash. Returns whether the user exists.
    async fn set_password_hash(&self, username: &str, password_hash: &str) -> Result<bool>;
}

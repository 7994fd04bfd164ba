//! In-process store.
//!
//! Keeps everything in `Vec`s behind `tokio::sync::RwLock`. Used by the test
//! suites and by `stocktake serve --memory`.

use async_trait::async_trait;
use chrono::Utc;
use stocktake_core::{NewUser, Product, ProductFields, ProductFilter, ProductId, User};
use tokio::sync::RwLock;

use crate::backend::{ProductStore, UserStore};
use crate::{Error, Result, new_object_id};

/// Store backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product> {
        let product = Product::from_fields(ProductId::new(new_object_id()), fields, Utc::now());
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn replace(&self, id: &ProductId, fields: ProductFields) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| &p.id == id).map(|p| {
            p.apply(fields, Utc::now());
            p.clone()
        }))
    }

    async fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| &p.id == id).map(|p| {
            p.quantity = quantity;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| &p.id != id);
        Ok(products.len() != before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(Error::DuplicateUsername {
                username: user.username,
            });
        }
        let user = user.into_user(new_object_id(), Utc::now());
        users.push(user.clone());
        Ok(user)
    }

    async fn delete_by_username(&self, username: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.username != username);
        Ok(users.len() != before)
    }

    async fn set_password_hash(&self, username: &str, password_hash: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        Ok(users
            .iter_mut()
            .find(|u| u.username == username)
            .map(|u| {
                u.password_hash = password_hash.to_string();
                u.updated_at = Utc::now();
            })
            .is_some())
    }
}

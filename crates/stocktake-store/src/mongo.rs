//! MongoDB backend.
//!
//! Document layout matches the collections the inventory deployment already
//! uses: `products` and `users`, camelCase timestamps, the product category
//! under `type`, and the bcrypt hash under `password`. Unknown fields
//! (such as `__v`) are ignored on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use stocktake_core::config::DatabaseConfig;
use stocktake_core::{NewUser, Product, ProductFields, ProductFilter, ProductId, Role, User};

use crate::backend::{ProductStore, UserStore};
use crate::{Error, Result};

const PRODUCTS: &str = "products";
const USERS: &str = "users";

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    quantity: i64,
    price: f64,
    company: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "createdAt", default = "epoch")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt", default = "epoch")]
    updated_at: BsonDateTime,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: ProductId::new(doc.id.to_hex()),
            name: doc.name,
            quantity: doc.quantity,
            price: doc.price,
            company: doc.company,
            kind: doc.kind,
            description: doc.description,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    username: String,
    password: String,
    name: String,
    #[serde(default)]
    role: String,
    #[serde(rename = "createdAt", default = "epoch")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt", default = "epoch")]
    updated_at: BsonDateTime,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id.to_hex(),
            role: parse_stored_role(&doc.username, &doc.role),
            username: doc.username,
            password_hash: doc.password,
            name: doc.name,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

fn epoch() -> BsonDateTime {
    BsonDateTime::from_millis(0)
}

fn to_chrono(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

fn to_bson(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

/// Roles are stored as free text; anything unrecognized gets the least
/// privilege rather than failing the whole read.
fn parse_stored_role(username: &str, stored: &str) -> Role {
    if stored.trim().is_empty() {
        return Role::default();
    }
    stored.parse().unwrap_or_else(|_| {
        log::warn!("User '{username}' has unknown role '{stored}', treating as viewer");
        Role::Viewer
    })
}

/// Parse a product id; malformed ids cannot match anything.
fn object_id(id: &ProductId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

fn company_filter(filter: &ProductFilter) -> Document {
    match &filter.company {
        Some(company) => doc! { "company": company.as_str() },
        None => doc! {},
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

// ============================================================================
// MongoStore
// ============================================================================

/// Store backed by a MongoDB database.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    products: Collection<ProductDocument>,
    users: Collection<UserDocument>,
}

impl MongoStore {
    /// Connect, select the configured database, and ensure indexes exist.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let store = Self::from_database(client.database(&config.name));
        store.ensure_indexes().await?;
        log::info!("Connected to MongoDB database '{}'", config.name);
        Ok(store)
    }

    /// Wrap an already selected database.
    pub fn from_database(db: Database) -> Self {
        Self {
            products: db.collection(PRODUCTS),
            users: db.collection(USERS),
            db,
        }
    }

    /// Create the unique username index if it does not exist.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let cursor = self.products.find(company_filter(filter)).await?;
        let docs: Vec<ProductDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let doc = self.products.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(Product::from))
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product> {
        let now = to_bson(Utc::now());
        let doc = ProductDocument {
            id: ObjectId::new(),
            name: fields.name,
            quantity: fields.quantity,
            price: fields.price,
            company: fields.company,
            kind: fields.kind,
            description: fields.description,
            created_at: now,
            updated_at: now,
        };
        self.products.insert_one(&doc).await?;
        log::debug!("Inserted product {}", doc.id);
        Ok(doc.into())
    }

    async fn replace(&self, id: &ProductId, fields: ProductFields) -> Result<Option<Product>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let update = doc! {
            "$set": {
                "name": fields.name.as_str(),
                "quantity": fields.quantity,
                "price": fields.price,
                "company": fields.company.as_str(),
                "type": fields.kind.as_str(),
                "description": fields.description.as_str(),
                "updatedAt": to_bson(Utc::now()),
            }
        };
        let doc = self
            .products
            .find_one_and_update(doc! { "_id": oid }, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Product::from))
    }

    async fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<Option<Product>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let update = doc! {
            "$set": { "quantity": quantity, "updatedAt": to_bson(Utc::now()) }
        };
        let doc = self
            .products
            .find_one_and_update(doc! { "_id": oid }, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Product::from))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool> {
        let Some(oid) = object_id(id) else {
            return Ok(false);
        };
        let result = self.products.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let doc = self.users.find_one(doc! { "username": username }).await?;
        Ok(doc.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>> {
        let cursor = self.users.find(doc! {}).await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let now = to_bson(Utc::now());
        let doc = UserDocument {
            id: ObjectId::new(),
            username: user.username,
            password: user.password_hash,
            name: user.name,
            role: user.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        match self.users.insert_one(&doc).await {
            Ok(_) => Ok(doc.into()),
            Err(e) if is_duplicate_key(&e) => Err(Error::DuplicateUsername {
                username: doc.username,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_username(&self, username: &str) -> Result<bool> {
        let result = self.users.delete_one(doc! { "username": username }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn set_password_hash(&self, username: &str, password_hash: &str) -> Result<bool> {
        let update = doc! {
            "$set": { "password": password_hash, "updatedAt": to_bson(Utc::now()) }
        };
        let result = self
            .users
            .update_one(doc! { "username": username }, update)
            .await?;
        Ok(result.matched_count > 0)
    }
}

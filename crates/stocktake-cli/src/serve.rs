//! `stocktake serve`

use std::sync::Arc;

use stocktake_api::{AppState, Server};
use stocktake_auth::password;
use stocktake_core::{Role, StocktakeConfig};
use stocktake_store::{MemoryStore, MongoStore, UserStore};

use crate::Result;
use crate::user_handlers::add_user;

/// Environment variable holding the dev-mode admin password.
pub const DEV_ADMIN_PASSWORD_ENV: &str = "STOCKTAKE_DEV_ADMIN_PASSWORD";

/// Username of the seeded dev-mode admin.
pub const DEV_ADMIN_USERNAME: &str = "admin";

/// Run the HTTP server until shutdown.
pub async fn run(mut config: StocktakeConfig, port: Option<u16>, memory: bool) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = if memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        let store = Arc::new(MemoryStore::new());
        let admin_password = std::env::var(DEV_ADMIN_PASSWORD_ENV).ok();
        seed_dev_admin(store.as_ref(), admin_password).await?;
        AppState::new(config, store.clone(), store)?
    } else {
        let store = Arc::new(MongoStore::connect(&config.database).await?);
        AppState::new(config, store.clone(), store)?
    };

    Server::new(state).run().await?;
    Ok(())
}

/// Seed the in-memory store with an admin account when a password is given.
///
/// Returns whether an account was created.
pub async fn seed_dev_admin(store: &dyn UserStore, password: Option<String>) -> Result<bool> {
    let Some(password) = password.filter(|p| !p.is_empty()) else {
        tracing::warn!(
            "{DEV_ADMIN_PASSWORD_ENV} is not set; no accounts exist and nobody can log in"
        );
        return Ok(false);
    };

    add_user(
        store,
        DEV_ADMIN_USERNAME,
        "Administrator",
        Role::Admin,
        password,
        password::DEFAULT_COST,
    )
    .await?;
    tracing::info!(username = DEV_ADMIN_USERNAME, "Seeded dev admin account");
    Ok(true)
}

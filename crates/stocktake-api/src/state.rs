//! Shared application state.

use std::sync::Arc;

use stocktake_auth::{AuthConfig, JwtValidator, TokenIssuer};
use stocktake_core::StocktakeConfig;
use stocktake_store::{ProductStore, UserStore};

use crate::Result;

/// State shared by every handler.
pub struct AppState {
    /// Product persistence.
    pub products: Arc<dyn ProductStore>,
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Signs tokens on login.
    pub issuer: TokenIssuer,
    /// Checks tokens in the auth middleware.
    pub validator: Arc<JwtValidator>,
    /// Auth middleware settings.
    pub auth: AuthConfig,
    /// Effective configuration.
    pub config: StocktakeConfig,
}

impl AppState {
    /// Build state from a validated config and the two stores.
    pub fn new(
        config: StocktakeConfig,
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
    ) -> Result<Arc<Self>> {
        config.validate()?;

        let secret = config.auth.jwt_secret.as_bytes();
        let issuer = TokenIssuer::new(secret, &config.auth.issuer, config.auth.token_ttl());
        let validator = Arc::new(JwtValidator::new(secret));
        let auth = AuthConfig::from(&config.auth);

        Ok(Arc::new(Self {
            products,
            users,
            issuer,
            validator,
            auth,
            config,
        }))
    }
}

mod auth;
mod export;
mod products;

pub mod app_config;
pub mod config;
pub mod products;
pub mod provider;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    fallback_name, Product, ProductCategory, ProductDetails, PLACEHOLDER_IMAGE_URL, PRICE_UNSET,
};
pub use provider::Provider;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown product category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

//! Contract with the external medicines/orders API.
//!
//! The order composer and catalog manager only see these traits; the
//! reqwest-backed [`HttpBackend`] is the production implementation.

use async_trait::async_trait;

use crate::{catalog::Medicine, orders::OrderLineItem};

/// HTTP client implementation
pub mod http;

pub use http::HttpBackend;

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Medicine catalog collaborator.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn list_medicines(&self) -> Result<Vec<Medicine>, ApiError>;

    async fn create_medicine(&self, name: &str) -> Result<Medicine, ApiError>;

    async fn update_medicine(&self, id: &str, name: &str) -> Result<Medicine, ApiError>;

    async fn delete_medicine(&self, id: &str) -> Result<(), ApiError>;
}

/// Order persistence collaborator.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Persist the full line-item sequence of an order.
    async fn persist_order(&self, items: &[OrderLineItem]) -> Result<(), ApiError>;
}

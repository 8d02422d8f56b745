use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::{ApiError, CatalogBackend, OrderBackend};
use crate::{
    catalog::{Medicine, MedicineInput},
    orders::OrderLineItem,
};

#[derive(Serialize)]
struct OrderPayload<'a> {
    medicines: &'a [OrderLineItem],
}

/// reqwest client for the medicines/orders API.
///
/// Paths are rooted at `{base_url}/api`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn medicines_url(&self) -> String {
        format!("{}/api/medicines", self.base_url)
    }

    /// `/api/medicines/{id}` with `id` percent-encoded as one path segment.
    fn medicine_url(&self, id: &str) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.medicines_url())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    fn orders_url(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }

    async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: code,
                message: body,
            });
        }
        Ok(resp)
    }

    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let resp = Self::ensure_success(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn list_medicines(&self) -> Result<Vec<Medicine>, ApiError> {
        let resp = self.http.get(self.medicines_url()).send().await?;
        Self::parse(resp).await
    }

    async fn create_medicine(&self, name: &str) -> Result<Medicine, ApiError> {
        let resp = self
            .http
            .post(self.medicines_url())
            .json(&MedicineInput::new(name))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn update_medicine(&self, id: &str, name: &str) -> Result<Medicine, ApiError> {
        let resp = self
            .http
            .put(self.medicine_url(id)?)
            .json(&MedicineInput::new(name))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn delete_medicine(&self, id: &str) -> Result<(), ApiError> {
        let resp = self.http.delete(self.medicine_url(id)?).send().await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderBackend for HttpBackend {
    async fn persist_order(&self, items: &[OrderLineItem]) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.orders_url())
            .json(&OrderPayload { medicines: items })
            .send()
            .await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }
}

//! Remote REST resources the stores synchronize against.
//!
//! Each resource is a trait so a store can be driven by the HTTP
//! implementation in production and by an in-memory double in tests.
//! The HTTP implementations treat any non-success response as a failure
//! of that operation and carry a fixed per-operation message.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, Result};
use crate::models::{Comment, NewComment, NewProduct, Product, ProductId};

/// Read-all, create, full-update and delete over the `products` collection.
pub trait ProductResource: Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Persist a draft; the response carries the server-assigned `id`.
    fn create(&self, draft: &NewProduct) -> impl Future<Output = Result<Product>> + Send;

    /// Replace the product stored under `product.id`.
    fn update(&self, product: &Product) -> impl Future<Output = Result<Product>> + Send;

    fn delete(&self, id: ProductId) -> impl Future<Output = Result<()>> + Send;
}

/// Filtered read and create over the `comments` collection.
pub trait CommentResource: Send + Sync + 'static {
    fn list_by_product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<Comment>>> + Send;

    fn create(&self, draft: &NewComment) -> impl Future<Output = Result<Comment>> + Send;
}

/// Build the HTTP client shared by both resources.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;
    Ok(client)
}

/// Fail with `message` unless the response status is 2xx.
fn check_status(resp: Response, message: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        tracing::warn!(status = status.as_u16(), url = %resp.url(), "{message}");
        Err(CatalogError::Status {
            status: status.as_u16(),
            message: message.to_string(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response, message: &str) -> Result<T> {
    let resp = check_status(resp, message)?;
    Ok(resp.json().await?)
}

// ---------------------------------------------------------------------------
// HttpProductResource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpProductResource {
    client: Client,
    url: String,
}

impl HttpProductResource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn item_url(&self, id: ProductId) -> String {
        format!("{}/{}", self.url, id)
    }
}

impl ProductResource for HttpProductResource {
    async fn list(&self) -> Result<Vec<Product>> {
        tracing::debug!(url = %self.url, "GET products");
        let resp = self.client.get(&self.url).send().await?;
        read_json(resp, "Failed to fetch products").await
    }

    async fn create(&self, draft: &NewProduct) -> Result<Product> {
        tracing::debug!(url = %self.url, name = %draft.name, "POST product");
        let resp = self.client.post(&self.url).json(draft).send().await?;
        read_json(resp, "Failed to add product").await
    }

    async fn update(&self, product: &Product) -> Result<Product> {
        let url = self.item_url(product.id);
        tracing::debug!(%url, "PUT product");
        let resp = self.client.put(&url).json(product).send().await?;
        read_json(resp, "Failed to update product").await
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE product");
        let resp = self.client.delete(&url).send().await?;
        check_status(resp, "Failed to delete product")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HttpCommentResource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpCommentResource {
    client: Client,
    url: String,
}

impl HttpCommentResource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CommentResource for HttpCommentResource {
    async fn list_by_product(&self, product_id: ProductId) -> Result<Vec<Comment>> {
        tracing::debug!(url = %self.url, product_id, "GET comments");
        let resp = self
            .client
            .get(&self.url)
            .query(&[("productId", product_id)])
            .send()
            .await?;
        read_json(resp, "Failed to fetch comments").await
    }

    async fn create(&self, draft: &NewComment) -> Result<Comment> {
        tracing::debug!(url = %self.url, product_id = draft.product_id, "POST comment");
        let resp = self.client.post(&self.url).json(draft).send().await?;
        read_json(resp, "Failed to add comment").await
    }
}

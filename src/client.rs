use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

use crate::error::{PreviewLoadError, SearchError};
use crate::input::ImageInput;
use crate::models::Product;

/// The remote similar-products service. A trait so the controller can be
/// driven against a stub in tests.
#[async_trait]
pub trait SearchApi {
    /// Submit an image and get the ranked product list back. One request per
    /// invocation, no coalescing, no caching, no retry.
    async fn search(&self, image: &ImageInput) -> Result<Vec<Product>, SearchError>;

    /// Check that a remote image URL actually serves an image, for previews.
    async fn probe_image_url(&self, url: &Url) -> Result<(), PreviewLoadError>;

    /// Fetch the full catalogue. Only used as a startup diagnostic.
    async fn list_products(&self) -> Result<Vec<Product>, SearchError>;
}

pub(crate) type BoxedSearchApi = Box<dyn SearchApi + Send + Sync>;

#[derive(Deserialize, Debug)]
struct ProductsBody {
    products: Vec<Product>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: String,
}

/// Success bodies are `{ "products": [...] }`, failure bodies are
/// `{ "error": "..." }`. A failure body that cannot be decoded still
/// surfaces as an API error with the generic message.
fn parse_search_response(ok: bool, body: &str) -> Result<Vec<Product>, SearchError> {
    if ok {
        let parsed: ProductsBody =
            serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(parsed.products)
    } else {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Err(SearchError::Api(parsed.error)),
            Err(_) => Err(SearchError::Api("something went wrong".to_string())),
        }
    }
}

pub struct HttpSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SearchApi for HttpSearchClient {
    async fn search(&self, image: &ImageInput) -> Result<Vec<Product>, SearchError> {
        let endpoint = self.endpoint("/api/search");
        log::info!("Searching similar products for {}", image.source_ref());

        let request = match image {
            ImageInput::File { bytes, mime, source } => {
                let file_name = source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| String::from("image"));

                let part = Part::bytes(bytes.clone())
                    .file_name(file_name)
                    .mime_str(mime.as_ref())
                    .map_err(SearchError::Transport)?;

                self.http
                    .post(&endpoint)
                    .multipart(Form::new().part("image", part))
            }
            ImageInput::Url { url } => self
                .http
                .post(&endpoint)
                .json(&json!({ "url": url.as_str() })),
        };

        let res = request.send().await?;
        let ok = res.status().is_success();
        let body = res.text().await?;

        let products = parse_search_response(ok, &body)?;
        log::info!("Search returned {} products", products.len());

        Ok(products)
    }

    async fn probe_image_url(&self, url: &Url) -> Result<(), PreviewLoadError> {
        log::info!("Loading preview for {}", url);

        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PreviewLoadError(e.to_string()))?;

        if !res.status().is_success() {
            return Err(PreviewLoadError(format!(
                "server answered {}",
                res.status()
            )));
        }

        let is_image = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("image/"))
            .unwrap_or(false);

        if !is_image {
            return Err(PreviewLoadError(String::from(
                "URL does not serve an image",
            )));
        }

        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, SearchError> {
        let res = self
            .http
            .get(self.endpoint("/api/products"))
            .send()
            .await?;

        let ok = res.status().is_success();
        let body = res.text().await?;

        parse_search_response(ok, &body)
    }
}

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::consts::{PAGE_SIZE, SEARCH_FIELDS};

use super::{Catalog, ProductRecord};

/// Barcode lookups answer with this status when the product exists.
const STATUS_FOUND: i64 = 1;

/// The Open Food Facts catalog over HTTP.
pub struct OpenFoodFactsCatalog {
    client: reqwest::Client,
    search_url: Url,
    product_url: Url,
}

impl OpenFoodFactsCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            product_url: config.product_url.clone(),
        })
    }

    /// `{search}?search_terms=<term>&search_simple=1&action=process&json=1&fields=...&page_size=5`
    pub fn search_request_url(&self, term: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("search_terms", term)
            .append_pair("search_simple", "1")
            .append_pair("action", "process")
            .append_pair("json", "1")
            .append_pair("fields", SEARCH_FIELDS)
            .append_pair("page_size", &PAGE_SIZE.to_string());
        url
    }

    /// `{product}/<barcode>.json`, barcode passed through as one path segment.
    pub fn product_request_url(&self, barcode: &str) -> Result<Url> {
        let mut url = self.product_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("product URL cannot take path segments: {}", self.product_url))?
            .pop_if_empty()
            .push(&format!("{barcode}.json"));
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        debug!(%url, "catalog request");
        let resp = self.client.get(url).send().await?;
        // Unknown barcodes come back as 404 with a JSON body, so the status
        // alone decides nothing. The body has to parse.
        let status = resp.status();
        let text = resp.text().await?;
        debug!(%status, bytes = text.len(), "catalog response");
        Ok(text)
    }

    fn parse_search(text: &str) -> Result<Vec<ProductRecord>> {
        let body: SearchResponse = serde_json::from_str(text)
            .with_context(|| format!("unexpected search response: {}", snippet(text)))?;
        Ok(body
            .products
            .into_iter()
            .filter_map(ApiProduct::from_value)
            .map(ProductRecord::from)
            .collect())
    }

    fn parse_product(text: &str) -> Result<Option<ProductRecord>> {
        let body: ProductResponse = serde_json::from_str(text)
            .with_context(|| format!("unexpected product response: {}", snippet(text)))?;
        if body.status != STATUS_FOUND {
            return Ok(None);
        }
        Ok(body
            .product
            .and_then(ApiProduct::from_value)
            .map(ProductRecord::from))
    }
}

#[async_trait]
impl Catalog for OpenFoodFactsCatalog {
    async fn search(&self, term: &str) -> Result<Vec<ProductRecord>> {
        let text = self.get_text(self.search_request_url(term)).await?;
        Self::parse_search(&text)
    }

    async fn product(&self, barcode: &str) -> Result<Option<ProductRecord>> {
        let url = self.product_request_url(barcode)?;
        let text = self.get_text(url).await?;
        Self::parse_product(&text)
    }
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

// --- API types ---

#[derive(Deserialize)]
struct SearchResponse {
    products: Vec<Value>,
}

#[derive(Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiProduct {
    #[serde(deserialize_with = "non_blank_string")]
    product_name: Option<String>,
    #[serde(deserialize_with = "non_blank_string")]
    image_thumb_url: Option<String>,
    #[serde(deserialize_with = "non_blank_string")]
    ingredients_text: Option<String>,
    #[serde(deserialize_with = "string_tags")]
    allergens_tags: Vec<String>,
    #[serde(deserialize_with = "string_tags")]
    labels_tags: Vec<String>,
}

impl ApiProduct {
    /// Fields never fail to decode, so only a non-object entry is dropped.
    fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(product) => Some(product),
            Err(e) => {
                debug!(error = %e, "skipping malformed product entry");
                None
            }
        }
    }
}

impl From<ApiProduct> for ProductRecord {
    fn from(p: ApiProduct) -> Self {
        Self {
            name: p.product_name,
            image_url: p.image_thumb_url,
            ingredients_text: p.ingredients_text,
            allergen_tags: p.allergens_tags,
            label_tags: p.labels_tags,
        }
    }
}

/// Anything but a non-blank string reads as absent.
fn non_blank_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// String elements of an array. Other shapes read as no tags.
fn string_tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

pub mod mock;
pub mod openfoodfacts;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// What the user asked for. Blank input never becomes a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    Text(String),
    Barcode(String),
}

impl ProductQuery {
    /// A free-text query, or `None` if `term` is blank.
    pub fn text(term: &str) -> Option<Self> {
        non_blank(term).map(Self::Text)
    }

    /// A barcode query, or `None` if `code` is blank. The code is otherwise
    /// passed through untouched.
    pub fn barcode(code: &str) -> Option<Self> {
        non_blank(code).map(Self::Barcode)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(term) => term,
            Self::Barcode(code) => code,
        }
    }
}

impl fmt::Display for ProductQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(term) => write!(f, "\"{term}\""),
            Self::Barcode(code) => write!(f, "barcode {code}"),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// The subset of a catalog product this app cares about.
///
/// Upstream data is patchy, so every field has a harmless default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub ingredients_text: Option<String>,
    /// Namespaced allergen tags, e.g. `en:gluten`.
    pub allergen_tags: Vec<String>,
    /// Namespaced label tags, e.g. `en:gluten-free`.
    pub label_tags: Vec<String>,
}

/// User-visible message attached to an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoResults,
    FetchError,
    NotFound,
    RetrieveError,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoResults => "No results found.",
            Self::FetchError => "Error fetching data.",
            Self::NotFound => "Product not found.",
            Self::RetrieveError => "Error retrieving product.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one lookup: products in upstream order, or a notice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultSet {
    products: Vec<ProductRecord>,
    notice: Option<Notice>,
    preselected: Option<usize>,
}

impl SearchResultSet {
    /// A list of products, capped at `limit`.
    pub fn found(mut products: Vec<ProductRecord>, limit: usize) -> Self {
        products.truncate(limit);
        Self {
            products,
            notice: None,
            preselected: None,
        }
    }

    /// A single product, already selected so its verdict shows right away.
    pub fn single(product: ProductRecord) -> Self {
        Self {
            products: vec![product],
            notice: None,
            preselected: Some(0),
        }
    }

    /// No products, with a message for the user.
    pub fn empty(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn get(&self, index: usize) -> Option<&ProductRecord> {
        self.products.get(index)
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// The message text, if any.
    pub fn message(&self) -> Option<&'static str> {
        self.notice.map(Notice::as_str)
    }

    pub fn preselected(&self) -> Option<usize> {
        self.preselected
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A remote product catalog. Errors are transport or decoding failures;
/// "nothing matched" is a successful empty answer.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Full-text search. Returns products in upstream order.
    async fn search(&self, term: &str) -> Result<Vec<ProductRecord>>;

    /// Barcode lookup. `Ok(None)` means the catalog does not know the code.
    async fn product(&self, barcode: &str) -> Result<Option<ProductRecord>>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    async fn search(&self, term: &str) -> Result<Vec<ProductRecord>> {
        (**self).search(term).await
    }

    async fn product(&self, barcode: &str) -> Result<Option<ProductRecord>> {
        (**self).product(barcode).await
    }
}

//! Turns one query into one catalog request and one [`SearchResultSet`].
//!
//! Nothing fails past this point: transport and decoding errors are logged
//! and folded into a [`Notice`] on an empty result set.

use tracing::{debug, info, warn};

use crate::consts::PAGE_SIZE;
use crate::product::{Catalog, Notice, ProductQuery, SearchResultSet};

pub struct LookupClient {
    catalog: Box<dyn Catalog>,
}

impl LookupClient {
    pub fn new(catalog: Box<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Run whichever lookup the query asks for.
    pub async fn lookup(&self, query: &ProductQuery) -> SearchResultSet {
        match query {
            ProductQuery::Text(term) => self.search_by_name(term).await,
            ProductQuery::Barcode(code) => self.lookup_by_barcode(code).await,
        }
    }

    /// Free-text search, at most [`PAGE_SIZE`] products.
    pub async fn search_by_name(&self, term: &str) -> SearchResultSet {
        let term = term.trim();
        if term.is_empty() {
            debug!("blank search term, no request sent");
            return SearchResultSet::default();
        }

        match self.catalog.search(term).await {
            Ok(products) if products.is_empty() => {
                info!(term, "search returned no products");
                SearchResultSet::empty(Notice::NoResults)
            }
            Ok(products) => {
                info!(term, count = products.len(), "search returned products");
                SearchResultSet::found(products, PAGE_SIZE)
            }
            Err(e) => {
                warn!(term, error = %format!("{e:#}"), "error fetching data");
                SearchResultSet::empty(Notice::FetchError)
            }
        }
    }

    /// Single product by barcode. A hit comes back preselected.
    pub async fn lookup_by_barcode(&self, code: &str) -> SearchResultSet {
        let code = code.trim();
        if code.is_empty() {
            debug!("blank barcode, no request sent");
            return SearchResultSet::default();
        }

        match self.catalog.product(code).await {
            Ok(Some(product)) => {
                info!(code, "barcode found");
                SearchResultSet::single(product)
            }
            Ok(None) => {
                info!(code, "barcode not found");
                SearchResultSet::empty(Notice::NotFound)
            }
            Err(e) => {
                warn!(code, error = %format!("{e:#}"), "barcode fetch error");
                SearchResultSet::empty(Notice::RetrieveError)
            }
        }
    }
}

//! Project-wide constants.

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Open Food Facts full-text search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";

/// Open Food Facts per-barcode endpoint. The code is appended as `<code>.json`.
pub const DEFAULT_PRODUCT_URL: &str = "https://world.openfoodfacts.org/api/v0/product";

/// Fields requested from the search endpoint.
pub const SEARCH_FIELDS: &str =
    "product_name,allergens_tags,ingredients_text,image_thumb_url,labels_tags";

/// Maximum number of products in one result set.
pub const PAGE_SIZE: usize = 5;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// `User-Agent` sent to the catalog, e.g. `wheat/0.1.0`.
pub fn user_agent() -> String {
    format!("{NAME}/{VERSION} (gluten check CLI)")
}

use std::sync::Arc;

use wheat::lookup::LookupClient;
use wheat::product::mock::{MockCatalog, Reply};
use wheat::product::{Notice, ProductQuery, ProductRecord};

fn named(name: &str) -> ProductRecord {
    ProductRecord {
        name: Some(name.to_string()),
        ..ProductRecord::default()
    }
}

fn client(replies: Vec<Reply>) -> (LookupClient, Arc<MockCatalog>) {
    let mock = Arc::new(MockCatalog::new(replies));
    (LookupClient::new(Box::new(Arc::clone(&mock))), mock)
}

// ── search by name ───────────────────────────────────────────────

#[tokio::test]
async fn search_returns_products_in_order() {
    let (client, _) = client(vec![Reply::Products(vec![named("A"), named("B"), named("C")])]);
    let set = client.search_by_name("crackers").await;

    let names: Vec<_> = set.products().iter().map(|p| p.name.as_deref()).collect();
    assert_eq!(names, vec![Some("A"), Some("B"), Some("C")]);
    assert!(set.message().is_none());
    assert!(set.preselected().is_none());
}

#[tokio::test]
async fn search_caps_at_page_size() {
    let products = (0..9).map(|i| named(&format!("P{i}"))).collect();
    let (client, _) = client(vec![Reply::Products(products)]);
    let set = client.search_by_name("anything").await;
    assert_eq!(set.len(), 5);
    assert_eq!(set.get(4).unwrap().name.as_deref(), Some("P4"));
}

#[tokio::test]
async fn search_with_no_products() {
    let (client, _) = client(vec![Reply::Products(vec![])]);
    let set = client.search_by_name("zzzzzz").await;
    assert!(set.is_empty());
    assert_eq!(set.message(), Some("No results found."));
}

#[tokio::test]
async fn search_failure_is_absorbed() {
    let (client, _) = client(vec![Reply::Failure("connection refused".to_string())]);
    let set = client.search_by_name("bread").await;
    assert!(set.is_empty());
    assert_eq!(set.notice(), Some(Notice::FetchError));
    assert_eq!(set.message(), Some("Error fetching data."));
}

#[tokio::test]
async fn blank_search_sends_nothing() {
    let (client, mock) = client(vec![]);
    let set = client.search_by_name("   ").await;
    assert!(set.is_empty());
    assert!(set.message().is_none());
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn search_term_is_trimmed() {
    let (client, mock) = client(vec![Reply::Products(vec![named("A")])]);
    client.search_by_name("  heinz ketchup  ").await;
    assert_eq!(mock.requests(), vec!["heinz ketchup"]);
}

// ── lookup by barcode ────────────────────────────────────────────

#[tokio::test]
async fn barcode_hit_is_single_and_preselected() {
    let (client, _) = client(vec![Reply::Product(Some(named("Nutella")))]);
    let set = client.lookup_by_barcode("3017620422003").await;
    assert_eq!(set.len(), 1);
    assert_eq!(set.preselected(), Some(0));
    assert!(set.message().is_none());
}

#[tokio::test]
async fn barcode_miss() {
    let (client, _) = client(vec![Reply::Product(None)]);
    let set = client.lookup_by_barcode("0000000000000").await;
    assert!(set.is_empty());
    assert_eq!(set.message(), Some("Product not found."));
}

#[tokio::test]
async fn barcode_failure_is_absorbed() {
    let (client, _) = client(vec![Reply::Failure("timed out".to_string())]);
    let set = client.lookup_by_barcode("123").await;
    assert!(set.is_empty());
    assert_eq!(set.message(), Some("Error retrieving product."));
}

#[tokio::test]
async fn barcode_passes_through_untouched() {
    let (client, mock) = client(vec![Reply::Product(None)]);
    client.lookup_by_barcode("0012345678905").await;
    assert_eq!(mock.requests(), vec!["0012345678905"]);
}

#[tokio::test]
async fn blank_barcode_sends_nothing() {
    let (client, mock) = client(vec![]);
    let set = client.lookup_by_barcode("").await;
    assert!(set.is_empty());
    assert_eq!(mock.calls(), 0);
}

// ── dispatch by query ────────────────────────────────────────────

#[tokio::test]
async fn lookup_routes_by_query_kind() {
    let (client, mock) = client(vec![
        Reply::Products(vec![named("Bread")]),
        Reply::Product(Some(named("Ketchup"))),
    ]);

    let text = client.lookup(&ProductQuery::text("bread").unwrap()).await;
    assert_eq!(text.preselected(), None);

    let code = client.lookup(&ProductQuery::barcode("5000157024671").unwrap()).await;
    assert_eq!(code.preselected(), Some(0));

    assert_eq!(mock.requests(), vec!["bread", "5000157024671"]);
}

//! Plain-text rendering of result sets and verdicts.
//!
//! Everything returns a `String` so the REPL decides where it goes.

use crate::gluten::{Severity, Verdict, classify};
use crate::product::ProductRecord;
use crate::session::Session;

const UNNAMED: &str = "Unnamed product";
const NO_INGREDIENTS: &str = "Ingredients not listed.";

/// The verdict line with its severity icon.
pub fn render_verdict(verdict: &Verdict) -> String {
    let icon = match verdict.severity() {
        Severity::Warning => "⚠️ ",
        Severity::Safe => "✅",
    };
    let badge = if verdict.certified_gluten_free { " 🏅" } else { "" };
    format!("{icon} {verdict}{badge}")
}

/// One result card. Expanded cards show ingredients and the verdict.
pub fn render_card(number: usize, product: &ProductRecord, expanded: bool) -> String {
    let mut out = format!(
        "  [{number}] {}\n",
        product.name.as_deref().unwrap_or(UNNAMED)
    );
    if let Some(url) = &product.image_url {
        out.push_str(&format!("      image: {url}\n"));
    }
    if expanded {
        out.push_str(&format!(
            "      Ingredients: {}\n",
            product.ingredients_text.as_deref().unwrap_or(NO_INGREDIENTS)
        ));
        out.push_str(&format!("      {}\n", render_verdict(&classify(product))));
    }
    out
}

/// The whole screen: loading state, message, and every card.
pub fn render_session(session: &Session) -> String {
    if session.is_loading() {
        return match session.query() {
            Some(query) => format!("  Searching {query}...\n"),
            None => "  Searching...\n".to_string(),
        };
    }

    let results = session.results();
    let mut out = String::new();
    if let Some(message) = results.message() {
        out.push_str(&format!("  {message}\n"));
    }
    for (i, product) in results.products().iter().enumerate() {
        out.push_str(&render_card(i + 1, product, session.expanded_index() == Some(i)));
    }
    if results.len() > 1 && session.expanded_index().is_none() {
        out.push_str("  /check <n> to check one for gluten\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Notice, ProductQuery, SearchResultSet};

    fn ketchup() -> ProductRecord {
        ProductRecord {
            name: Some("Heinz Ketchup".to_string()),
            image_url: Some("https://images.example/ketchup.jpg".to_string()),
            ingredients_text: Some("tomatoes, vinegar, sugar".to_string()),
            label_tags: vec!["en:certified-gluten-free".to_string()],
            ..ProductRecord::default()
        }
    }

    #[test]
    fn verdict_icons() {
        let safe = classify(&ProductRecord::default());
        assert!(render_verdict(&safe).starts_with("✅"));

        let gluten = classify(&ProductRecord {
            allergen_tags: vec!["en:gluten".to_string()],
            ..ProductRecord::default()
        });
        assert!(render_verdict(&gluten).starts_with("⚠️"));
        assert!(render_verdict(&gluten).contains("Contains gluten"));
    }

    #[test]
    fn certified_gets_badge() {
        let line = render_verdict(&classify(&ketchup()));
        assert!(line.ends_with("🏅"));
        assert!(line.contains("Certified Gluten-Free"));
    }

    #[test]
    fn collapsed_card_hides_details() {
        let card = render_card(1, &ketchup(), false);
        assert!(card.contains("[1] Heinz Ketchup"));
        assert!(card.contains("ketchup.jpg"));
        assert!(!card.contains("Ingredients"));
    }

    #[test]
    fn expanded_card_shows_ingredients_and_verdict() {
        let card = render_card(2, &ketchup(), true);
        assert!(card.contains("Ingredients: tomatoes, vinegar, sugar"));
        assert!(card.contains("Gluten-free (according to this listing)"));
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let card = render_card(1, &ProductRecord::default(), true);
        assert!(card.contains(UNNAMED));
        assert!(card.contains(NO_INGREDIENTS));
        assert!(!card.contains("image:"));
    }

    #[test]
    fn session_shows_message() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("zzz").unwrap());
        assert_eq!(render_session(&session), "  Searching \"zzz\"...\n");
        session.complete(t, SearchResultSet::empty(Notice::NoResults));
        assert_eq!(render_session(&session), "  No results found.\n");
    }

    #[test]
    fn session_expands_only_selected() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("ketchup").unwrap());
        session.complete(t, SearchResultSet::found(vec![ketchup(), ketchup()], 5));
        let out = render_session(&session);
        assert!(!out.contains("Ingredients"));
        assert!(out.contains("/check <n>"));

        session.expand(1);
        let out = render_session(&session);
        assert_eq!(out.matches("Ingredients").count(), 1);
        assert!(out.find("[2]").unwrap() < out.find("Ingredients").unwrap());
    }
}

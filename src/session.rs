//! Presentation state: the one current result set and what is expanded.
//!
//! Lookups are tagged with a [`Ticket`] when they start. Only the latest
//! ticket may install its results, so a slow answer to an old query can
//! never overwrite a newer one.

use crate::gluten::{Verdict, classify};
use crate::product::{ProductQuery, ProductRecord, SearchResultSet};

/// Identifies one started lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Session {
    query: Option<ProductQuery>,
    results: SearchResultSet,
    expanded: Option<usize>,
    latest: u64,
    loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lookup. Drops the current results and supersedes any
    /// lookup still in flight.
    pub fn begin(&mut self, query: &ProductQuery) -> Ticket {
        self.latest += 1;
        self.query = Some(query.clone());
        self.results = SearchResultSet::default();
        self.expanded = None;
        self.loading = true;
        Ticket(self.latest)
    }

    /// Install the results of a finished lookup. Returns `false` and
    /// changes nothing if the ticket has been superseded.
    pub fn complete(&mut self, ticket: Ticket, results: SearchResultSet) -> bool {
        if ticket.0 != self.latest || !self.loading {
            return false;
        }
        self.expanded = results.preselected().filter(|&i| i < results.len());
        self.results = results;
        self.loading = false;
        true
    }

    /// Expand result `index`. Returns `false` if there is no such result.
    pub fn expand(&mut self, index: usize) -> bool {
        if index >= self.results.len() {
            return false;
        }
        self.expanded = Some(index);
        true
    }

    pub fn query(&self) -> Option<&ProductQuery> {
        self.query.as_ref()
    }

    pub fn results(&self) -> &SearchResultSet {
        &self.results
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded
    }

    /// The expanded product, if any.
    pub fn expanded(&self) -> Option<&ProductRecord> {
        self.expanded.and_then(|i| self.results.get(i))
    }

    /// Verdict for the expanded product, computed fresh on every call.
    pub fn verdict(&self) -> Option<Verdict> {
        self.expanded().map(classify)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Notice;

    fn named(name: &str) -> ProductRecord {
        ProductRecord {
            name: Some(name.to_string()),
            ..ProductRecord::default()
        }
    }

    #[test]
    fn new_session_is_idle() {
        let session = Session::new();
        assert!(!session.is_loading());
        assert!(session.results().is_empty());
        assert!(session.query().is_none());
        assert!(session.verdict().is_none());
    }

    #[test]
    fn begin_clears_previous_results() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("bread").unwrap());
        session.complete(t, SearchResultSet::single(named("Bread")));
        assert_eq!(session.expanded_index(), Some(0));

        session.begin(&ProductQuery::text("pasta").unwrap());
        assert!(session.is_loading());
        assert!(session.results().is_empty());
        assert!(session.expanded_index().is_none());
        assert_eq!(session.query().unwrap().as_str(), "pasta");
    }

    #[test]
    fn tickets_increase() {
        let mut session = Session::new();
        let q = ProductQuery::text("x").unwrap();
        let a = session.begin(&q);
        let b = session.begin(&q);
        assert_ne!(a, b);
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut session = Session::new();
        let old = session.begin(&ProductQuery::text("old").unwrap());
        let new = session.begin(&ProductQuery::text("new").unwrap());

        assert!(session.complete(new, SearchResultSet::found(vec![named("New")], 5)));
        assert!(!session.complete(old, SearchResultSet::found(vec![named("Old")], 5)));
        assert_eq!(session.results().get(0).unwrap().name.as_deref(), Some("New"));
    }

    #[test]
    fn ticket_completes_once() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("x").unwrap());
        assert!(session.complete(t, SearchResultSet::empty(Notice::NoResults)));
        assert!(!session.complete(t, SearchResultSet::found(vec![named("Late")], 5)));
        assert_eq!(session.results().message(), Some("No results found."));
    }

    #[test]
    fn text_results_start_collapsed() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("x").unwrap());
        session.complete(t, SearchResultSet::found(vec![named("A"), named("B")], 5));
        assert!(session.expanded().is_none());
        assert!(session.verdict().is_none());
    }

    #[test]
    fn expand_picks_one_result() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("x").unwrap());
        session.complete(t, SearchResultSet::found(vec![named("A"), named("B")], 5));

        assert!(session.expand(1));
        assert_eq!(session.expanded().unwrap().name.as_deref(), Some("B"));
        assert!(session.expand(0));
        assert_eq!(session.expanded_index(), Some(0));
    }

    #[test]
    fn expand_out_of_range_is_rejected() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::text("x").unwrap());
        session.complete(t, SearchResultSet::found(vec![named("A")], 5));
        assert!(session.expand(0));
        assert!(!session.expand(3));
        assert_eq!(session.expanded_index(), Some(0));
    }

    #[test]
    fn barcode_hit_is_expanded() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::barcode("123").unwrap());
        session.complete(t, SearchResultSet::single(named("Ketchup")));
        assert_eq!(session.expanded().unwrap().name.as_deref(), Some("Ketchup"));
        assert!(session.verdict().is_some());
    }

    #[test]
    fn verdict_is_recomputed_identically() {
        let mut session = Session::new();
        let t = session.begin(&ProductQuery::barcode("1").unwrap());
        session.complete(t, SearchResultSet::single(named("Gluten Free Oats")));
        let first = session.verdict().unwrap().to_string();
        let second = session.verdict().unwrap().to_string();
        assert_eq!(first, second);
    }
}

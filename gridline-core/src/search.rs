//! The search bar: typed tags in, filtered items and a query string out.

use crate::config::GridOptions;
use crate::filtering::FilterEngine;
use crate::models::{FilterTerm, Item};
use crate::query::to_query_string;
use crate::tags::{TagChange, TagCodec};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Result of a search submit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEvent {
    pub filter: Vec<FilterTerm>,
    pub filtered_items: Vec<Item>,
    pub query_string: String,
}

pub struct SearchBar {
    codec: TagCodec,
    engine: FilterEngine,
    items: Vec<Item>,
    ignored_query_keys: Vec<String>,
    on_filtered: Option<Box<dyn FnMut(&FilterEvent)>>,
}

impl fmt::Debug for SearchBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBar")
            .field("codec", &self.codec)
            .field("engine", &self.engine)
            .field("items", &self.items.len())
            .field("ignored_query_keys", &self.ignored_query_keys)
            .finish()
    }
}

impl SearchBar {
    pub fn new(options: &GridOptions) -> Self {
        Self::with_engine(options, FilterEngine::new())
    }

    pub fn with_engine(options: &GridOptions, engine: FilterEngine) -> Self {
        Self {
            codec: TagCodec::new(options.separator.as_str()),
            engine,
            items: Vec::new(),
            ignored_query_keys: options.ignored_query_keys.clone(),
            on_filtered: None,
        }
    }

    pub fn on_filtered<F>(&mut self, f: F)
    where
        F: FnMut(&FilterEvent) + 'static,
    {
        self.on_filtered = Some(Box::new(f));
    }

    /// Replace the searchable collection and filter it again
    pub fn set_items(&mut self, items: Vec<Item>) -> FilterEvent {
        self.items = items;
        self.submit()
    }

    /// Replace the terms with structured ones and filter again
    pub fn set_filter(&mut self, terms: Vec<FilterTerm>) -> FilterEvent {
        self.codec.set_terms(terms);
        self.submit()
    }

    /// Single-string filter from older callers. Behaves like typing the
    /// string as a tag and submitting.
    #[deprecated(note = "pass structured terms to `set_filter` or use `add_tag`")]
    pub fn set_filter_text(&mut self, text: &str) -> FilterEvent {
        warn!("a plain string filter is deprecated, use structured filter terms instead");
        self.codec.add(text);
        self.submit()
    }

    /// Add a typed tag. The filter is applied on the next submit.
    pub fn add_tag(&mut self, input: &str) -> Option<TagChange> {
        self.codec.add(input)
    }

    /// Remove a tag by position and filter again
    pub fn remove_tag(&mut self, index: usize) -> (Option<TagChange>, FilterEvent) {
        let change = self.codec.remove(index);
        (change, self.submit())
    }

    /// Drop every tag and filter again
    pub fn clear(&mut self) -> FilterEvent {
        self.codec.clear();
        self.submit()
    }

    pub fn tags(&self) -> Vec<String> {
        self.codec.tags()
    }

    pub fn submit(&mut self) -> FilterEvent {
        let filter = self.codec.filter_terms();
        let filtered_items = self.engine.filter(&self.items, &filter);
        let query_string = to_query_string(&filter, &self.ignored_query_keys);

        debug!(
            "search submitted: {} of {} items, query '{}'",
            filtered_items.len(),
            self.items.len(),
            query_string
        );

        let event = FilterEvent {
            filter,
            filtered_items,
            query_string,
        };
        if let Some(callback) = self.on_filtered.as_mut() {
            callback(&event);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldPath;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn items() -> Vec<Item> {
        vec![
            json!({"id": 1, "title": "Task 1", "duration": "65"}),
            json!({"id": 2, "title": "Task 3", "duration": "10"}),
            json!({"id": 3, "title": "Chore", "duration": "1"}),
        ]
    }

    fn search_bar() -> SearchBar {
        let mut bar = SearchBar::new(&GridOptions::default());
        bar.set_items(items());
        bar
    }

    #[test]
    fn test_no_tags_returns_everything() {
        let mut bar = search_bar();
        let event = bar.submit();
        assert_eq!(event.filtered_items.len(), 3);
        assert_eq!(event.query_string, "");
    }

    #[test]
    fn test_tags_filter_on_submit() {
        let mut bar = search_bar();
        bar.add_tag("duration=65");
        bar.add_tag("title=Task 3");

        let event = bar.submit();
        assert_eq!(event.filtered_items.len(), 2);
        assert_eq!(event.query_string, "duration=65&title=Task%203");
        assert_eq!(event.filter.len(), 2);
    }

    #[test]
    fn test_free_text_tag() {
        let mut bar = search_bar();
        bar.add_tag("chore");

        let event = bar.submit();
        assert_eq!(event.filtered_items, vec![items()[2].clone()]);
    }

    #[test]
    fn test_remove_tag_resubmits() {
        let mut bar = search_bar();
        bar.add_tag("duration=65");
        bar.add_tag("duration=10");

        let (change, event) = bar.remove_tag(0);
        assert_eq!(change.unwrap().values, vec!["10".to_string()]);
        assert_eq!(event.filtered_items.len(), 1);
        assert_eq!(bar.tags(), vec!["duration=10".to_string()]);
    }

    #[test]
    fn test_clear_shows_everything() {
        let mut bar = search_bar();
        bar.add_tag("duration=65");

        let event = bar.clear();
        assert_eq!(event.filtered_items.len(), 3);
        assert!(bar.tags().is_empty());
    }

    #[test]
    fn test_structured_filter() {
        let mut bar = search_bar();
        let event = bar.set_filter(vec![FilterTerm::new(
            "Title",
            FieldPath::key("title"),
            vec!["chore".to_string()],
        )]);

        assert_eq!(event.filtered_items.len(), 1);
        assert_eq!(bar.tags(), vec!["Title=chore".to_string()]);
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_string_filter_still_works() {
        let mut bar = search_bar();
        let event = bar.set_filter_text("title=Chore");
        assert_eq!(event.filtered_items.len(), 1);
    }

    #[test]
    fn test_custom_engine() {
        let engine = FilterEngine::with_method(|items: &[Item]| items.to_vec());
        let mut bar = SearchBar::with_engine(&GridOptions::default(), engine);
        bar.set_items(items());
        bar.add_tag("title=nothing matches");

        assert_eq!(bar.submit().filtered_items.len(), 3);
    }

    #[test]
    fn test_on_filtered_notified() {
        let counts = Rc::new(RefCell::new(Vec::new()));
        let mut bar = SearchBar::new(&GridOptions::default());
        {
            let counts = counts.clone();
            bar.on_filtered(move |event| counts.borrow_mut().push(event.filtered_items.len()));
        }

        bar.set_items(items());
        bar.add_tag("duration=1");
        bar.submit();

        assert_eq!(*counts.borrow(), vec![3, 1]);
    }
}

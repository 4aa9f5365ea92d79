use crate::models::{FilterTerm, Item};
use crate::path::{get_in, leaf_texts, value_to_text};
use log::debug;
use serde_json::Value;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Caller-provided replacement for the built-in matching, e.g. when the
/// collection is filtered on a server
pub type FilterMethod = Box<dyn Fn(&[Item]) -> Vec<Item>>;

/// Evaluates filter terms against item collections
#[derive(Default)]
pub struct FilterEngine {
    method: Option<FilterMethod>,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("custom_method", &self.method.is_some())
            .finish()
    }
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate all filtering to `method`, bypassing term evaluation
    pub fn with_method<F>(method: F) -> Self
    where
        F: Fn(&[Item]) -> Vec<Item> + 'static,
    {
        Self {
            method: Some(Box::new(method)),
        }
    }

    pub fn filter(&self, items: &[Item], terms: &[FilterTerm]) -> Vec<Item> {
        if items.is_empty() {
            return items.to_vec();
        }

        if let Some(method) = &self.method {
            debug!("delegating {} items to custom filter method", items.len());
            return method(items);
        }

        apply_filters(items, terms)
    }
}

/// Apply filters to a list of items, returning only those that match
pub fn apply_filters(items: &[Item], terms: &[FilterTerm]) -> Vec<Item> {
    let filtered: Vec<Item> = items
        .iter()
        .filter(|item| matches_filters(item, terms))
        .cloned()
        .collect();

    debug!(
        "filtered {} items down to {} with {} active terms",
        items.len(),
        filtered.len(),
        terms.iter().filter(|t| t.is_active()).count()
    );

    filtered
}

/// Check if an item matches the given terms.
///
/// Every value of every term is evaluated on its own and the item is kept
/// when any evaluation passes (OR across terms and within a term). An item
/// always passes when no term has values.
pub fn matches_filters(item: &Item, terms: &[FilterTerm]) -> bool {
    let mut evaluated = false;

    for term in terms.iter().filter(|t| t.is_active()) {
        evaluated = true;

        let matched = if term.fields.is_empty() {
            term.values.iter().any(|value| search_any_field(item, value))
        } else {
            let item_value = get_in(item, &term.fields);
            term.values
                .iter()
                .any(|value| matches_field_value(item_value, value))
        };

        if matched {
            return true;
        }
    }

    !evaluated
}

/// Check if any term carries values
pub fn has_filters(terms: &[FilterTerm]) -> bool {
    terms.iter().any(|t| t.is_active())
}

/// Case-insensitive substring search over every field of an item
pub fn search_any_field(item: &Item, term: &str) -> bool {
    let needle = fold_case(term);
    let mut texts = Vec::new();
    leaf_texts(item, &mut texts);

    texts.iter().any(|text| fold_case(text).contains(&needle))
}

/// Exact, trimmed, case-insensitive comparison of a resolved field.
///
/// A field the item does not have at all passes: the collection may come
/// from a server that trimmed the schema after filtering on it already.
fn matches_field_value(item_value: Option<&Value>, wanted: &str) -> bool {
    match item_value {
        None => true,
        Some(Value::Null) => false,
        Some(value) => match value_to_text(value) {
            Some(text) => fold_case(text.trim()) == fold_case(wanted.trim()),
            None => false,
        },
    }
}

/// Unicode-normalized lower-casing so composed and decomposed text agree
pub fn fold_case(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

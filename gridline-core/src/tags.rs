//! Free-text tags and the filter terms behind them.
//!
//! A tag is typed as `key=value` (or just `value` to search every field).
//! The codec merges each tag into the term for its key and keeps a flat,
//! contiguously numbered tag list in sync with the terms so the UI can
//! delete tags by position.

use crate::models::{FieldPath, FilterTerm, Tag};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_SEPARATOR: &str = "=";

/// Key and value of a typed tag. An empty key means "any field".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTerm {
    pub key: String,
    pub value: String,
}

/// Split a typed tag on the first separator. `=value` is free text.
pub fn parse_term(input: &str, separator: &str) -> ParsedTerm {
    match input.split_once(separator) {
        Some((key, value)) if !separator.is_empty() => ParsedTerm {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        },
        _ => ParsedTerm {
            key: String::new(),
            value: input.trim().to_string(),
        },
    }
}

/// Render one term value as tag text
pub fn tag_text(display: &str, value: &str, separator: &str) -> String {
    if display.is_empty() {
        value.to_string()
    } else {
        format!("{}{}{}", display, separator, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagChangeKind {
    Added,
    Removed,
}

/// Describes a single tag mutation.
///
/// `values` holds every value currently filed under `key` after the change,
/// so a caller can resync its own copy of that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChange {
    pub key: String,
    pub kind: TagChangeKind,
    pub value: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
struct TaggedTerm {
    term: FilterTerm,
    tags: Vec<Tag>,
}

pub struct TagCodec {
    separator: String,
    terms: Vec<TaggedTerm>,
    on_change: Option<Box<dyn FnMut(&TagChange)>>,
}

impl fmt::Debug for TagCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagCodec")
            .field("separator", &self.separator)
            .field("terms", &self.terms)
            .finish()
    }
}

impl Default for TagCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl TagCodec {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            terms: Vec::new(),
            on_change: None,
        }
    }

    pub fn on_change<F>(&mut self, f: F)
    where
        F: FnMut(&TagChange) + 'static,
    {
        self.on_change = Some(Box::new(f));
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parse a typed tag and file its value under the matching term.
    ///
    /// Returns `None` when the tag carries no value.
    pub fn add(&mut self, input: &str) -> Option<TagChange> {
        let parsed = parse_term(input, &self.separator);
        if parsed.value.is_empty() {
            debug!("ignoring tag without a value: {:?}", input);
            return None;
        }

        let wanted = parsed.key.to_lowercase();
        let term_pos = match self
            .terms
            .iter()
            .position(|t| t.term.display.to_lowercase() == wanted)
        {
            Some(pos) => pos,
            None => {
                let fields = if parsed.key.is_empty() {
                    FieldPath::any()
                } else {
                    FieldPath::key(parsed.key.as_str())
                };
                self.terms.push(TaggedTerm {
                    term: FilterTerm::new(parsed.key.as_str(), fields, Vec::new()),
                    tags: Vec::new(),
                });
                self.terms.len() - 1
            }
        };

        // the new tag goes right after the target term's existing tags
        let tag_index: usize = self.terms[..=term_pos].iter().map(|t| t.tags.len()).sum();
        for later in &mut self.terms[term_pos + 1..] {
            for tag in &mut later.tags {
                tag.tag_index += 1;
            }
        }

        let separator = self.separator.clone();
        let target = &mut self.terms[term_pos];
        target.term.values.push(parsed.value.clone());
        target.tags.push(Tag {
            text: tag_text(&target.term.display, &parsed.value, &separator),
            tag_index,
        });

        let change = TagChange {
            key: target.term.display.clone(),
            kind: TagChangeKind::Added,
            value: parsed.value,
            values: target.term.values.clone(),
        };
        self.notify(&change);
        Some(change)
    }

    /// Remove the tag at `index` in the flattened tag list.
    ///
    /// Only that value is dropped from its term; every later tag moves down
    /// one position.
    pub fn remove(&mut self, index: usize) -> Option<TagChange> {
        let found = self.terms.iter().enumerate().find_map(|(term_pos, t)| {
            t.tags
                .iter()
                .position(|tag| tag.tag_index == index)
                .map(|tag_pos| (term_pos, tag_pos))
        });

        let Some((term_pos, tag_pos)) = found else {
            warn!(
                "no tag at index {} ({} tags present)",
                index,
                self.tag_count()
            );
            return None;
        };

        let target = &mut self.terms[term_pos];
        let value = target.term.values.remove(tag_pos);
        target.tags.remove(tag_pos);

        for tag in self.terms.iter_mut().flat_map(|t| t.tags.iter_mut()) {
            if tag.tag_index > index {
                tag.tag_index -= 1;
            }
        }

        let target = &self.terms[term_pos];
        let change = TagChange {
            key: target.term.display.clone(),
            kind: TagChangeKind::Removed,
            value,
            values: target.term.values.clone(),
        };
        self.notify(&change);
        Some(change)
    }

    /// Drop every value and tag but keep the terms themselves
    pub fn clear(&mut self) {
        for tagged in &mut self.terms {
            tagged.term.values.clear();
            tagged.tags.clear();
        }
    }

    /// Replace the terms with structured ones and rebuild their tags
    pub fn set_terms(&mut self, terms: Vec<FilterTerm>) {
        self.terms = terms
            .into_iter()
            .map(|term| TaggedTerm {
                term,
                tags: Vec::new(),
            })
            .collect();
        self.reindex();
    }

    /// Current terms without their tag bookkeeping
    pub fn filter_terms(&self) -> Vec<FilterTerm> {
        self.terms.iter().map(|t| t.term.clone()).collect()
    }

    /// Display text of every tag, term by term
    pub fn tags(&self) -> Vec<String> {
        self.tag_list().into_iter().map(|tag| tag.text).collect()
    }

    /// Every tag with its index, term by term
    pub fn tag_list(&self) -> Vec<Tag> {
        self.terms
            .iter()
            .flat_map(|t| t.tags.iter().cloned())
            .collect()
    }

    pub fn tag_count(&self) -> usize {
        self.terms.iter().map(|t| t.tags.len()).sum()
    }

    fn reindex(&mut self) {
        let separator = self.separator.clone();
        let mut next = 0;
        for tagged in &mut self.terms {
            tagged.tags = tagged
                .term
                .values
                .iter()
                .map(|value| {
                    let tag = Tag {
                        text: tag_text(&tagged.term.display, value, &separator),
                        tag_index: next,
                    };
                    next += 1;
                    tag
                })
                .collect();
        }
    }

    fn notify(&mut self, change: &TagChange) {
        debug!(
            "tag {:?} on '{}': {:?} -> {:?}",
            change.kind, change.key, change.value, change.values
        );
        if let Some(callback) = self.on_change.as_mut() {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::apply_filters;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn indices(codec: &TagCodec) -> Vec<usize> {
        codec.tag_list().iter().map(|t| t.tag_index).collect()
    }

    #[test]
    fn test_parse_with_separator() {
        let parsed = parse_term("author=Sam", "=");
        assert_eq!(parsed.key, "author");
        assert_eq!(parsed.value, "Sam");

        let parsed = parse_term(" author = Sam ", "=");
        assert_eq!(parsed.key, "author");
        assert_eq!(parsed.value, "Sam");
    }

    #[test]
    fn test_parse_free_text() {
        let parsed = parse_term("Sam", "=");
        assert_eq!(parsed.key, "");
        assert_eq!(parsed.value, "Sam");

        let parsed = parse_term(" = Sam", "=");
        assert_eq!(parsed.key, "");
        assert_eq!(parsed.value, "Sam");
    }

    #[test]
    fn test_empty_key_tag_matches_any_field() {
        let mut codec = TagCodec::default();
        codec.add("=Sam");

        let terms = codec.filter_terms();
        assert!(terms[0].fields.is_empty());
        assert_eq!(codec.tags(), vec!["Sam".to_string()]);

        let items = vec![json!({"author": "Sam"}), json!({"author": "Alex"})];
        assert_eq!(apply_filters(&items, &terms), vec![items[0].clone()]);
    }

    #[test]
    fn test_parse_splits_on_first_separator_only() {
        let parsed = parse_term("expr=a=b", "=");
        assert_eq!(parsed.key, "expr");
        assert_eq!(parsed.value, "a=b");
    }

    #[test]
    fn test_parse_custom_separator() {
        let parsed = parse_term("author: Sam", ":");
        assert_eq!(parsed.key, "author");
        assert_eq!(parsed.value, "Sam");
    }

    #[test]
    fn test_add_merges_by_key_ignoring_case() {
        let mut codec = TagCodec::default();
        codec.add("Author=Sam");
        let change = codec.add("author=Alex").unwrap();

        let terms = codec.filter_terms();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].display, "Author");
        assert_eq!(terms[0].fields, FieldPath::key("Author"));
        assert_eq!(change.values, vec!["Sam".to_string(), "Alex".to_string()]);
        assert_eq!(change.kind, TagChangeKind::Added);
    }

    #[test]
    fn test_free_text_term_searches_any_field() {
        let mut codec = TagCodec::default();
        codec.add("task");

        let terms = codec.filter_terms();
        assert_eq!(terms[0].display, "");
        assert!(terms[0].fields.is_empty());
        assert_eq!(codec.tags(), vec!["task".to_string()]);
    }

    #[test]
    fn test_add_ignores_empty_values() {
        let mut codec = TagCodec::default();
        assert!(codec.add("   ").is_none());
        assert!(codec.add("author=").is_none());
        assert_eq!(codec.tag_count(), 0);
    }

    #[test]
    fn test_serialize_tags() {
        let mut codec = TagCodec::default();
        codec.add("author=Sam");
        codec.add("task");
        codec.add("author=Alex");

        assert_eq!(
            codec.tags(),
            vec![
                "author=Sam".to_string(),
                "author=Alex".to_string(),
                "task".to_string()
            ]
        );
        assert_eq!(indices(&codec), vec![0, 1, 2]);
    }

    #[test]
    fn test_append_gets_running_total() {
        let mut codec = TagCodec::default();
        codec.add("a=1");
        codec.add("b=2");
        codec.add("b=3");

        assert_eq!(indices(&codec), vec![0, 1, 2]);
        assert_eq!(codec.tag_list()[2].text, "b=3");
    }

    #[test]
    fn test_remove_renumbers_later_tags() {
        let mut codec = TagCodec::default();
        codec.add("a=1");
        codec.add("b=2");
        codec.add("c=3");
        assert_eq!(indices(&codec), vec![0, 1, 2]);

        let change = codec.remove(1).unwrap();
        assert_eq!(change.key, "b");
        assert_eq!(change.value, "2");
        assert!(change.values.is_empty());
        assert_eq!(change.kind, TagChangeKind::Removed);

        assert_eq!(indices(&codec), vec![0, 1]);
        assert_eq!(codec.tags(), vec!["a=1".to_string(), "c=3".to_string()]);
    }

    #[test]
    fn test_remove_only_that_value() {
        let mut codec = TagCodec::default();
        codec.add("a=1");
        codec.add("a=2");

        let change = codec.remove(0).unwrap();
        assert_eq!(change.values, vec!["2".to_string()]);
        assert_eq!(codec.tags(), vec!["a=2".to_string()]);
        assert_eq!(indices(&codec), vec![0]);
    }

    #[test]
    fn test_remove_unknown_index() {
        let mut codec = TagCodec::default();
        codec.add("a=1");
        assert!(codec.remove(5).is_none());
        assert_eq!(codec.tag_count(), 1);
    }

    #[test]
    fn test_clear_keeps_terms() {
        let mut codec = TagCodec::default();
        codec.add("a=1");
        codec.add("free");
        codec.clear();

        assert_eq!(codec.tag_count(), 0);
        let terms = codec.filter_terms();
        assert_eq!(terms.len(), 2);
        assert!(terms.iter().all(|t| t.values.is_empty()));
    }

    #[test]
    fn test_set_terms_rebuilds_tags() {
        let mut codec = TagCodec::default();
        codec.set_terms(vec![
            FilterTerm::new("Title", FieldPath::key("title"), vec!["x".to_string()]),
            FilterTerm::new("Empty", FieldPath::key("empty"), Vec::new()),
            FilterTerm::new("", FieldPath::any(), vec!["y".to_string(), "z".to_string()]),
        ]);

        assert_eq!(
            codec.tags(),
            vec!["Title=x".to_string(), "y".to_string(), "z".to_string()]
        );
        assert_eq!(indices(&codec), vec![0, 1, 2]);

        // typed tags merge into the structured term, which keeps its fields
        codec.add("title=w");
        let terms = codec.filter_terms();
        assert_eq!(terms[0].fields, FieldPath::key("title"));
        assert_eq!(terms[0].values, vec!["x".to_string(), "w".to_string()]);
        assert_eq!(indices(&codec), vec![0, 1, 2, 3]);
        assert_eq!(codec.tag_list()[1].text, "Title=w");
    }

    #[test]
    fn test_on_change_notified() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut codec = TagCodec::default();
        {
            let seen = seen.clone();
            codec.on_change(move |change| seen.borrow_mut().push(change.clone()));
        }

        codec.add("a=1");
        codec.remove(0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind, TagChangeKind::Added);
        assert_eq!(seen[1].kind, TagChangeKind::Removed);
    }
}

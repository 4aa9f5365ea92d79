use crate::models::{Comparator, FieldPath, Item, RowData, SortDirection, SortSpec};
use crate::path::get_in;
use log::debug;
use regex::Regex;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static LEADING_ARTICLES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(the|a|an|der|die|das|le|la|les|el|la|los|las|il|lo|i|gli|un|une|een)\s+")
        .expect("leading article pattern is valid")
});

/// Sort rows by the active specs.
///
/// Specs with direction `None` are ignored. The rest are applied in
/// ascending `order`, each one as a full stable sort of the previous result,
/// so the last spec applied decides the final order and the earlier ones
/// only break its ties.
pub fn sort_rows(rows: &[RowData<Item>], specs: &[SortSpec]) -> Vec<RowData<Item>> {
    if rows.is_empty() || specs.is_empty() {
        return rows.to_vec();
    }

    let mut active: Vec<&SortSpec> = specs.iter().filter(|s| s.is_active()).collect();
    active.sort_by_key(|s| s.order);

    let mut sorted = rows.to_vec();
    for spec in active {
        debug!(
            "sorting {} rows by '{}' {:?}",
            sorted.len(),
            spec.field,
            spec.direction
        );
        sorted.sort_by(|a, b| compare_by_spec(&a.item, &b.item, spec));
    }

    sorted
}

/// Sort plain items by the active specs, see [`sort_rows`]
pub fn sort_items(items: &[Item], specs: &[SortSpec]) -> Vec<Item> {
    let rows: Vec<RowData<Item>> = items.iter().cloned().map(RowData::new).collect();
    sort_rows(&rows, specs)
        .into_iter()
        .map(|row| row.item)
        .collect()
}

/// Compare two items under a single spec, direction applied
pub fn compare_by_spec(a: &Item, b: &Item, spec: &SortSpec) -> Ordering {
    let ordering = match &spec.compare {
        Some(compare) => compare.compare(a, b),
        None => compare_values(get_in(a, &spec.field), get_in(b, &spec.field)),
    };

    match spec.direction {
        SortDirection::Descending => ordering.reverse(),
        _ => ordering,
    }
}

/// Natural ordering of resolved field values.
///
/// `null` comes before everything, so it leads an ascending sort and trails a
/// descending one. Values of different kinds are ranked
/// null < bool < number < string < array < object < missing.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Array(x), Value::Array(y)) => {
                for (left, right) in x.iter().zip(y.iter()) {
                    match compare_values(Some(left), Some(right)) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                x.len().cmp(&y.len())
            }
            _ => kind_rank(Some(a)).cmp(&kind_rank(Some(b))),
        },
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
        None => 6,
    }
}

fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a.cmp(&b);
    }
    let a = x.as_f64().unwrap_or(0.0);
    let b = y.as_f64().unwrap_or(0.0);
    a.total_cmp(&b)
}

/// Library-style comparator for a text field: leading articles, accents
/// and letter case are ignored, the raw text breaks ties. Non-text values
/// fall back to [`compare_values`].
pub fn collated(field: FieldPath) -> Comparator {
    Comparator::new(move |a, b| {
        let a_val = get_in(a, &field);
        let b_val = get_in(b, &field);

        match (a_val, b_val) {
            (Some(Value::String(a_str)), Some(Value::String(b_str))) => {
                let a_key = normalize_for_sorting(a_str);
                let b_key = normalize_for_sorting(b_str);

                match a_key.cmp(&b_key) {
                    Ordering::Equal => a_str.cmp(b_str),
                    other => other,
                }
            }
            _ => compare_values(a_val, b_val),
        }
    })
}

/// Normalize string for library science sorting
/// - Strip leading articles (a, an, the)
/// - Normalize unicode (NFD then lowercase)
/// - Collapse whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let without_articles = strip_leading_articles(s);

    let normalized: String = without_articles
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip leading articles following library science conventions
pub fn strip_leading_articles(s: &str) -> String {
    LEADING_ARTICLES.replace(s.trim_start(), "").to_string()
}

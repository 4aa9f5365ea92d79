use crate::error::{GridError, Result};
use crate::models::{FieldPath, Item, PathSegment, SortDirection, SortSpec};
use crate::path::{get_in, value_to_text};
use crate::text::to_title_case;
use serde::{Deserialize, Serialize};

/// A table column definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub field: Option<FieldPath>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl Column {
    pub fn new(field: impl Into<FieldPath>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sort = Some(SortSpec::default());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// Visible columns, with headers defaulted from simple field names
pub fn visible_columns(columns: &[Column]) -> Vec<Column> {
    columns
        .iter()
        .filter(|c| !c.hidden)
        .map(|c| {
            let mut column = c.clone();
            if column.header.is_none() {
                if let Some(PathSegment::Key(key)) = single_key(column.field.as_ref()) {
                    column.header = Some(to_title_case(key));
                }
            }
            column
        })
        .collect()
}

fn single_key(field: Option<&FieldPath>) -> Option<&PathSegment> {
    match field.map(|f| f.segments()) {
        Some([segment]) => Some(segment),
        _ => None,
    }
}

/// Apply a click on the header of `columns[clicked]`.
///
/// The clicked column cycles asc -> desc -> none and takes order 0. Every
/// other sortable column is renumbered from 1 in column order; without
/// `multi_sort` their directions are cleared first.
pub fn header_clicked(columns: &mut [Column], clicked: usize, multi_sort: bool) {
    if clicked >= columns.len() {
        return;
    }

    let mut order = 1;
    for (i, column) in columns.iter_mut().enumerate() {
        if i == clicked {
            continue;
        }
        if let Some(sort) = column.sort.as_mut() {
            if !multi_sort {
                sort.direction = SortDirection::None;
            }
            sort.order = order;
            order += 1;
        }
    }

    let column = &mut columns[clicked];
    let field = column.field.clone().unwrap_or_default();
    let sort = column.sort.get_or_insert_with(SortSpec::default);
    sort.field = field;
    sort.order = 0;
    sort.direction = sort.direction.next();
}

/// Sort specs of every sortable column, by ascending order
pub fn sort_specs(columns: &[Column]) -> Vec<SortSpec> {
    let mut specs: Vec<SortSpec> = columns
        .iter()
        .filter_map(|c| {
            c.sort.as_ref().map(|sort| {
                let mut spec = sort.clone();
                if let Some(field) = &c.field {
                    spec.field = field.clone();
                }
                spec
            })
        })
        .collect();

    specs.sort_by_key(|s| s.order);
    specs
}

/// Text shown in a column's cell for an item
pub fn cell_text(item: &Item, column: &Column) -> String {
    column
        .field
        .as_ref()
        .and_then(|field| get_in(item, field))
        .and_then(value_to_text)
        .unwrap_or_default()
}

/// Parse a sort argument: `field` sorts ascending, `-field` descending,
/// and `field:asc` / `field:desc` name the direction explicitly
pub fn parse_sort_arg(arg: &str) -> Result<(FieldPath, SortDirection)> {
    let arg = arg.trim();

    let (name, direction) = if let Some(name) = arg.strip_prefix('-') {
        (name, SortDirection::Descending)
    } else if let Some((name, dir)) = arg.rsplit_once(':') {
        let direction = match dir.trim().to_lowercase().as_str() {
            "asc" | "ascending" => SortDirection::Ascending,
            "desc" | "descending" => SortDirection::Descending,
            other => {
                return Err(GridError::InvalidSort(format!(
                    "unknown direction '{}' in '{}'",
                    other, arg
                )))
            }
        };
        (name, direction)
    } else {
        (arg, SortDirection::Ascending)
    };

    let field = FieldPath::parse_dotted(name);
    if field.is_empty() {
        return Err(GridError::InvalidSort(format!("no field in '{}'", arg)));
    }

    Ok((field, direction))
}

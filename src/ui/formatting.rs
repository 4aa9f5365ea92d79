use colored::Colorize;
use gridline_core::{
    cell_text, visible_columns, Column, FilterEvent, Item, RowData, SortDirection, SortSpec,
};
use serde::Serialize;

use crate::state::AppState;

/// Machine-readable view of the current page
#[derive(Debug, Serialize)]
pub struct PageOutput<'a> {
    pub file: String,
    pub tags: Vec<String>,
    pub query_string: &'a str,
    pub matching_items: usize,
    pub total_pages: usize,
    pub page_number: usize,
    pub items: Vec<&'a Item>,
}

pub fn page_output<'a>(state: &'a AppState, event: &'a FilterEvent) -> PageOutput<'a> {
    PageOutput {
        file: state.get_file_name(),
        tags: state.search.tags(),
        query_string: &event.query_string,
        matching_items: event.filtered_items.len(),
        total_pages: state.pager.total_pages(),
        page_number: state.pager.page_number(),
        items: state.pager.current_page().iter().map(|r| &r.item).collect(),
    }
}

/// Format a sort spec as `field (asc)`
pub fn format_sort(spec: &SortSpec) -> String {
    let direction = match spec.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
        SortDirection::None => "none",
    };
    format!("{} ({})", spec.field, direction)
}

/// Format the pager line, marking the current page within the button window
pub fn format_pager(state: &AppState) -> String {
    let current = state.pager.page_number();
    let buttons: Vec<String> = state
        .pager
        .page_buffer()
        .map(|n| {
            if n == current {
                format!("[{}]", n + 1)
            } else {
                (n + 1).to_string()
            }
        })
        .collect();

    format!(
        "Page {} of {}  {}",
        current.saturating_add(1),
        state.pager.total_pages().max(1),
        buttons.join(" ")
    )
}

/// Render rows as a markdown table
pub fn format_table(columns: &[Column], rows: &[RowData<Item>]) -> String {
    let columns = visible_columns(columns);
    let headers: Vec<String> = columns
        .iter()
        .map(|c| {
            c.header
                .clone()
                .or_else(|| c.field.as_ref().map(|f| f.dotted()))
                .unwrap_or_default()
        })
        .collect();

    let mut lines = vec![
        format!("| {} |", headers.join(" | ")),
        format!("|{}|", vec!["---"; headers.len()].join("|")),
    ];

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| cell_text(&row.item, c).replace('|', "\\|"))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}

pub fn print_page(state: &AppState, event: &FilterEvent) {
    println!("{}\n", format!("# {}", state.get_file_name()).bold());

    let tags = state.search.tags();
    if !tags.is_empty() {
        println!("## Active Filters\n");
        for (i, tag) in tags.iter().enumerate() {
            println!("- [{}] {}", i, tag);
        }
        println!();
        if !event.query_string.is_empty() {
            println!("**Query:** `{}`\n", event.query_string);
        }
    }

    let sorts = state.active_sorts();
    if !sorts.is_empty() {
        let sorts: Vec<String> = sorts.iter().map(format_sort).collect();
        println!("**Sorted by:** {}\n", sorts.join(", "));
    }

    println!("**Matching Items:** {}\n", event.filtered_items.len());

    if event.filtered_items.is_empty() {
        println!("{}\n", "_No items match the specified filters._".dimmed());
        return;
    }

    println!("{}\n", format_table(&state.columns, state.pager.current_page()));
    println!("{}", format_pager(state).cyan());
}

// Public modules
pub mod columns;
pub mod config;
pub mod error;
pub mod filtering;
pub mod io;
pub mod models;
pub mod paging;
pub mod path;
pub mod query;
pub mod rows;
pub mod search;
pub mod sorting;
pub mod tags;
pub mod text;

// Re-export commonly used types for convenience
pub use columns::{cell_text, header_clicked, parse_sort_arg, sort_specs, visible_columns, Column};
pub use config::{load_options, GridOptions};
pub use error::{GridError, Result};
pub use filtering::{apply_filters, has_filters, matches_filters, FilterEngine, FilterMethod};
pub use io::{load_items, parse_items};
pub use models::{
    Comparator, FieldPath, FilterTerm, Item, PathSegment, RowData, SortDirection, SortSpec, Tag,
};
pub use paging::{page, total_pages, PageChanged, Pager};
pub use path::get_in;
pub use query::to_query_string;
pub use rows::{collapse_all, rows_from_items, selected_items, set_all_selected, toggle_expanded};
pub use search::{FilterEvent, SearchBar};
pub use sorting::{collated, normalize_for_sorting, sort_items, sort_rows, strip_leading_articles};
pub use tags::{parse_term, ParsedTerm, TagChange, TagChangeKind, TagCodec};
pub use text::{to_camel_case, to_title_case};

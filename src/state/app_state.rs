use gridline_core::*;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Application state management
/// Owns the loaded collection and every piece of table state derived from it
#[derive(Debug)]
pub struct AppState {
    /// Path to the loaded item file
    pub current_file: Option<PathBuf>,
    /// Every item as loaded, never reordered
    pub items: Vec<Item>,
    /// Tags and filtering
    pub search: SearchBar,
    /// Table columns, derived from the item fields
    pub columns: Vec<Column>,
    /// Filtered and sorted rows, split into pages
    pub pager: Pager<RowData<Item>>,
    /// Compare text columns with library collation
    pub collate: bool,
}

impl AppState {
    pub fn new(options: GridOptions) -> Self {
        let search = SearchBar::new(&options);
        let pager = Pager::new(options.page_size, options.max_page_buttons);

        Self {
            current_file: None,
            items: Vec::new(),
            search,
            columns: Vec::new(),
            pager,
            collate: false,
        }
    }

    /// Load an item file and derive sortable columns from its fields
    pub fn load_from_file(&mut self, path: PathBuf) -> Result<()> {
        let items = load_items(&path)?;

        self.columns = columns_for(&items);
        self.items = items;
        self.current_file = Some(path);
        self.search.set_items(self.items.clone());

        Ok(())
    }

    /// Filter, sort and page the collection with the current state
    pub fn refresh(&mut self) -> FilterEvent {
        let event = self.search.submit();

        let mut specs = sort_specs(&self.columns);
        if self.collate {
            specs = specs
                .into_iter()
                .map(|spec| {
                    let field = spec.field.clone();
                    spec.with_compare(collated(field))
                })
                .collect();
        }

        let rows = rows_from_items(event.filtered_items.clone());
        let sorted = sort_rows(&rows, &specs);
        self.pager.set_items(sorted);

        event
    }

    /// Active sort specs in the order they are applied
    pub fn active_sorts(&self) -> Vec<SortSpec> {
        sort_specs(&self.columns)
            .into_iter()
            .filter(|s| s.is_active())
            .collect()
    }

    /// Get the display name of the current file
    pub fn get_file_name(&self) -> String {
        self.current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
            .to_string()
    }
}

/// One sortable column per top-level field seen in any item
fn columns_for(items: &[Item]) -> Vec<Column> {
    let fields: BTreeSet<&String> = items
        .iter()
        .filter_map(|item| item.as_object())
        .flat_map(|map| map.keys())
        .collect();

    fields
        .into_iter()
        .map(|field| Column::new(field.as_str()).sortable())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_for_union_of_fields() {
        let items = vec![json!({"b": 1, "a": 2}), json!({"c": 3}), json!("scalar")];
        let columns = columns_for(&items);

        let fields: Vec<String> = columns
            .iter()
            .map(|c| c.field.as_ref().unwrap().dotted())
            .collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
        assert!(columns.iter().all(|c| c.sort.is_some()));
    }

    #[test]
    fn test_refresh_filters_sorts_and_pages() {
        let mut state = AppState::new(GridOptions {
            page_size: 2,
            ..GridOptions::default()
        });
        state.items = vec![
            json!({"id": 1, "v": 3}),
            json!({"id": 2, "v": 1}),
            json!({"id": 3, "v": 2}),
        ];
        state.columns = columns_for(&state.items);
        state.search.set_items(state.items.clone());

        let v = state
            .columns
            .iter()
            .position(|c| c.field == Some(FieldPath::key("v")))
            .unwrap();
        header_clicked(&mut state.columns, v, false);

        let event = state.refresh();
        assert_eq!(event.filtered_items.len(), 3);
        assert_eq!(state.pager.total_pages(), 2);

        let ids: Vec<i64> = state
            .pager
            .current_page()
            .iter()
            .map(|r| r.item["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }
}

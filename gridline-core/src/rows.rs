use crate::models::RowData;

/// Wrap items in fresh rows, nothing expanded or selected
pub fn rows_from_items<T>(items: Vec<T>) -> Vec<RowData<T>> {
    items.into_iter().map(RowData::new).collect()
}

/// Toggle the detail view of one row. At most one row is expanded at a
/// time, so any other expanded row is collapsed.
///
/// Returns the new expanded state of the row, or `None` if out of range.
pub fn toggle_expanded<T>(rows: &mut [RowData<T>], index: usize) -> Option<bool> {
    if index >= rows.len() {
        return None;
    }

    for (i, row) in rows.iter_mut().enumerate() {
        if i != index {
            row.expanded = false;
        }
    }

    let row = &mut rows[index];
    row.expanded = !row.expanded;
    Some(row.expanded)
}

/// Close the detail view, e.g. when the page changes
pub fn collapse_all<T>(rows: &mut [RowData<T>]) {
    rows.iter_mut().for_each(|row| row.expanded = false);
}

pub fn set_all_selected<T>(rows: &mut [RowData<T>], selected: bool) {
    rows.iter_mut().for_each(|row| row.selected = selected);
}

pub fn selected_items<T>(rows: &[RowData<T>]) -> Vec<&T> {
    rows.iter().filter(|r| r.selected).map(|r| &r.item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_row_expanded() {
        let mut rows = rows_from_items(vec!["a", "b", "c"]);

        assert_eq!(toggle_expanded(&mut rows, 0), Some(true));
        assert_eq!(toggle_expanded(&mut rows, 2), Some(true));
        assert!(!rows[0].expanded);
        assert!(rows[2].expanded);

        assert_eq!(toggle_expanded(&mut rows, 2), Some(false));
        assert!(rows.iter().all(|r| !r.expanded));
        assert_eq!(toggle_expanded(&mut rows, 9), None);
    }

    #[test]
    fn test_collapse_all() {
        let mut rows = rows_from_items(vec![1, 2]);
        toggle_expanded(&mut rows, 1);
        collapse_all(&mut rows);
        assert!(rows.iter().all(|r| !r.expanded));
    }

    #[test]
    fn test_selection() {
        let mut rows = rows_from_items(vec![1, 2, 3]);
        rows[1].selected = true;
        assert_eq!(selected_items(&rows), vec![&2]);

        set_all_selected(&mut rows, true);
        assert_eq!(selected_items(&rows).len(), 3);

        set_all_selected(&mut rows, false);
        assert!(selected_items(&rows).is_empty());
    }
}

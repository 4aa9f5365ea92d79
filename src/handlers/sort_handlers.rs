use gridline_core::{header_clicked, parse_sort_arg, Column, Result, SortDirection};

use crate::state::AppState;

/// Turn `--sort` arguments into header clicks.
///
/// The first argument is a plain click, every later one a multi-sort
/// (ctrl) click, so earlier columns keep their direction.
pub fn apply_sort_args(state: &mut AppState, args: &[String]) -> Result<()> {
    for (i, arg) in args.iter().enumerate() {
        let (field, direction) = parse_sort_arg(arg)?;

        // columns may hold single literal keys, so compare the dotted text
        let wanted = field.dotted();
        let index = match state
            .columns
            .iter()
            .position(|c| c.field.as_ref().is_some_and(|f| f.dotted() == wanted))
        {
            Some(index) => index,
            None => {
                state.columns.push(Column::new(field).sortable());
                state.columns.len() - 1
            }
        };

        // asc -> desc -> none, so at most three clicks reach any direction
        for _ in 0..3 {
            header_clicked(&mut state.columns, index, i > 0);
            if current_direction(&state.columns[index]) == direction {
                break;
            }
        }
    }

    Ok(())
}

fn current_direction(column: &Column) -> SortDirection {
    column
        .sort
        .as_ref()
        .map(|s| s.direction)
        .unwrap_or_default()
}

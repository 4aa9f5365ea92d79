use log::warn;

use crate::state::AppState;

/// Add every typed tag to the search bar
pub fn apply_tags(state: &mut AppState, tags: &[String]) {
    for tag in tags {
        if state.search.add_tag(tag).is_none() {
            warn!("Ignoring tag '{}': it has no value", tag);
        }
    }
}

/// Remove tags by position, as clicking their delete buttons would.
/// Indices refer to the tag list as it is before any removal.
pub fn drop_tags(state: &mut AppState, indices: &[usize]) {
    let mut indices = indices.to_vec();
    indices.sort_unstable();
    indices.dedup();

    // highest first so earlier positions stay valid
    for index in indices.into_iter().rev() {
        let (change, _) = state.search.remove_tag(index);
        if change.is_none() {
            warn!("Ignoring tag index {}: there is no such tag", index);
        }
    }
}

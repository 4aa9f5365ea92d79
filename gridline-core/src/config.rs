use crate::error::Result;
use crate::tags::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables shared by the search bar, pager and query string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Splits a typed tag into key and value
    pub separator: String,
    pub page_size: usize,
    /// Above this many pages the pager shows a moving window of buttons
    pub max_page_buttons: usize,
    /// Fields never written to the query string
    pub ignored_query_keys: Vec<String>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            page_size: 3,
            max_page_buttons: 10,
            ignored_query_keys: vec!["id".to_string()],
        }
    }
}

/// Load options from a JSON file; missing fields keep their defaults
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<GridOptions> {
    let contents = fs::read_to_string(path)?;
    let options: GridOptions = serde_json::from_str(&contents)?;
    Ok(options)
}

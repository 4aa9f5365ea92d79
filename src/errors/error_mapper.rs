use gridline_core::GridError;
use std::io::ErrorKind;
use std::path::Path;

/// Map file loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_file_load_error(error: &GridError, path: &Path) -> (String, String, String) {
    match error {
        GridError::Io(io) if io.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        GridError::Io(io) if io.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        GridError::Serialization(e) => (
            "Invalid JSON".to_string(),
            "The file is not valid JSON.".to_string(),
            format!("{}\n\nPath: {}", e, path.display()),
        ),
        GridError::InvalidItems(reason) => (
            "Invalid Item File".to_string(),
            "The file does not contain an item collection.".to_string(),
            format!(
                "{}\n\nExpected a JSON array of items or an object with an 'items' array.",
                reason
            ),
        ),
        other => (
            "Error Loading File".to_string(),
            "Failed to load item file.".to_string(),
            other.to_string(),
        ),
    }
}

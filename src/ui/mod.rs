pub mod formatting;

pub use formatting::{page_output, print_page};

pub mod filter_handlers;
pub mod sort_handlers;

pub use filter_handlers::{apply_tags, drop_tags};
pub use sort_handlers::apply_sort_args;

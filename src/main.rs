use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gridline_core::{load_options, GridOptions};
use std::path::PathBuf;
use std::process;

mod errors;
mod handlers;
mod state;
mod ui;

use errors::map_file_load_error;
use handlers::{apply_sort_args, apply_tags, drop_tags};
use state::AppState;
use ui::{page_output, print_page};

/// Filter, sort and page a JSON item collection the way the table does
///
/// Examples:
///   # First page of all items
///   gridline items.json
///
///   # Exact match on a field (OR across tags)
///   gridline items.json --tag duration=65 --tag "title=Task 3"
///
///   # Free-text search over every field
///   gridline items.json --tag task
///
///   # Sort by title descending, then page through
///   gridline items.json --sort -title --page 2 --page-size 10
#[derive(Parser, Debug)]
#[command(name = "gridline")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - A tag is either 'field=value' (exact, case-insensitive) or free text (substring of any field)\n  \
    - Tags on the same field and tags on different fields are combined with OR\n  \
    - Items without a tagged field are kept\n\n\
Sorting:\n  \
    - 'field' or 'field:asc' ascending, '-field' or 'field:desc' descending\n  \
    - The first --sort is a plain header click, later ones are ctrl-clicks")]
struct Cli {
    /// Path to a JSON array of items, or an object with an 'items' array
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Filter tag, 'field=value' or free text (can be specified multiple times)
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Remove the tag at this position after adding tags
    #[arg(long = "drop-tag", value_name = "INDEX")]
    drop_tags: Vec<usize>,

    /// Sort column (can be specified multiple times)
    #[arg(short, long = "sort", value_name = "FIELD")]
    sorts: Vec<String>,

    /// Compare text with library collation (ignore articles, accents and case)
    #[arg(long)]
    collate: bool,

    /// Zero-based page number
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    page: usize,

    /// Items per page
    #[arg(short = 'n', long, value_name = "N")]
    page_size: Option<usize>,

    /// JSON options file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut options = match &cli.config {
        Some(path) => load_options(path)
            .with_context(|| format!("loading options from '{}'", path.display()))?,
        None => GridOptions::default(),
    };
    if let Some(size) = cli.page_size {
        options.page_size = size;
    }

    let mut state = AppState::new(options);
    state.collate = cli.collate;

    if let Err(err) = state.load_from_file(cli.file.clone()) {
        let (title, message, details) = map_file_load_error(&err, &cli.file);
        eprintln!("{} {}\n\n{}", format!("{}:", title).red().bold(), message, details);
        process::exit(1);
    }

    apply_tags(&mut state, &cli.tags);
    drop_tags(&mut state, &cli.drop_tags);
    apply_sort_args(&mut state, &cli.sorts).context("parsing --sort")?;

    let event = state.refresh();
    state.pager.set_page_number(cli.page);

    if cli.json {
        let output = page_output(&state, &event);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_page(&state, &event);
    }

    Ok(())
}

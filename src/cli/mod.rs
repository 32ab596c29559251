//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::errors::RagError;

/// Exit code for "the store holds no embeddings yet".
pub const EXIT_NO_DATA: i32 = 2;

/// Exit code for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Report `err` on stderr (or stdout as JSON) and pick the exit code.
///
/// An empty store is a normal outcome before the first ingestion, so it gets
/// a plain message and its own exit code instead of an error trace.
pub fn handle_error(err: &anyhow::Error, json: bool) -> i32 {
    let rag_error = err.chain().find_map(|e| e.downcast_ref::<RagError>());
    let no_data = rag_error.is_some_and(RagError::is_no_data);

    if json {
        let payload = serde_json::json!({
            "error": if no_data { "No embeddings found in the store.".to_string() } else { format!("{err:#}") },
            "no_data": no_data,
        });
        println!("{payload}");
    } else if no_data {
        eprintln!("No embeddings found in the store.");
    } else {
        eprintln!("Error: {err:#}");
    }

    if no_data {
        EXIT_NO_DATA
    } else {
        EXIT_FAILURE
    }
}

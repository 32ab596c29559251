//! Command handlers. Each takes its parsed arguments, the wired services and
//! the `--json` flag.

pub mod ingest;
pub mod list;
pub mod neighbors;
pub mod query;
pub mod show;

/// Resolve an optional `--top-k` against the configured default.
pub(crate) fn top_k_or(arg: Option<u64>, default: usize) -> usize {
    arg.and_then(|k| usize::try_from(k).ok()).unwrap_or(default)
}

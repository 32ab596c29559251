//! Paragraph segmentation
//!
//! Splits a document on blank-line boundaries. Boundaries are purely
//! structural; no size cap is applied, so an oversized paragraph surfaces as
//! an embedding-service error for its document rather than being truncated.

/// Two consecutive line breaks.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split `text` into non-empty paragraph chunks.
///
/// `\r\n` line endings are normalized first. Chunks are trimmed of
/// surrounding line breaks only, so indentation inside a paragraph survives.
/// Empty or whitespace-only chunks (three or more consecutive line breaks,
/// leading or trailing blank lines) are dropped.
pub fn segment(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split(PARAGRAPH_SEPARATOR)
        .map(|chunk| chunk.trim_matches('\n'))
        .filter(|chunk| !chunk.trim().is_empty())
        .map(str::to_string)
        .collect()
}

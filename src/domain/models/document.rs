//! Source documents handed to the ingestion path.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{RagError, RagResult};

/// A blog post fetched from a document source.
///
/// Immutable once built. The id is derived from the source file name so
/// re-running ingestion over the same source maps to the same keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique id: the file name up to its first `.`.
    pub id: String,

    /// The text exactly as fetched.
    pub raw_text: String,

    /// Markup-stripped text, when cleaning is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned_text: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
            cleaned_text: None,
        }
    }

    /// Build a document from a file name such as `2024-01-02-rust.md`.
    pub fn from_file_name(file_name: &str, raw_text: impl Into<String>) -> RagResult<Self> {
        Ok(Self::new(document_id_from_file_name(file_name)?, raw_text))
    }

    pub fn with_cleaned_text(mut self, cleaned: impl Into<String>) -> Self {
        self.cleaned_text = Some(cleaned.into());
        self
    }

    /// Text that should be embedded and stored: cleaned when available.
    pub fn embeddable_text(&self) -> &str {
        self.cleaned_text.as_deref().unwrap_or(&self.raw_text)
    }
}

/// Derive a document id from a file name: everything before the first `.`.
pub fn document_id_from_file_name(file_name: &str) -> RagResult<String> {
    let id = file_name.split('.').next().unwrap_or_default().trim();
    if id.is_empty() {
        return Err(RagError::Source(format!(
            "cannot derive a document id from file name '{file_name}'"
        )));
    }
    Ok(id.to_string())
}

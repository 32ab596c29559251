//! Table output formatting for CLI commands using comfy-table.

use std::env;

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::domain::models::{EmbeddingRecord, SimilarityResult};
use crate::domain::ports::RecordSnapshot;
use crate::services::IngestionReport;

const PREVIEW_CHARS: usize = 60;

fn base_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

/// Ranked results: rank, id, score, content preview.
pub fn results_table(results: &[SimilarityResult]) -> Table {
    let mut table = base_table(&["#", "ID", "Score", "Preview"]);
    for (rank, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&result.id),
            Cell::new(format!("{:.4}", result.score)).set_alignment(CellAlignment::Right),
            Cell::new(preview(result.content.as_deref())),
        ]);
    }
    table
}

/// Stored records: id, dimension, content length.
pub fn records_table(records: &RecordSnapshot) -> Table {
    let mut table = base_table(&["ID", "Dimension", "Content chars"]);
    for record in records.values() {
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(record.dimension()).set_alignment(CellAlignment::Right),
            Cell::new(content_chars(record)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One row per processed entry with its outcome.
pub fn report_table(report: &IngestionReport) -> Table {
    let use_colors = supports_color();
    let status = |label: &str, color: Color| {
        let cell = Cell::new(label);
        if use_colors {
            cell.fg(color)
        } else {
            cell
        }
    };

    let mut table = base_table(&["Status", "Document", "Detail"]);
    for id in &report.stored {
        table.add_row(vec![status("stored", Color::Green), Cell::new(id), Cell::new("")]);
    }
    for id in &report.skipped {
        table.add_row(vec![
            status("skipped", Color::Yellow),
            Cell::new(id),
            Cell::new("already embedded"),
        ]);
    }
    for failure in &report.failed {
        table.add_row(vec![
            status("failed", Color::Red),
            Cell::new(&failure.entry),
            Cell::new(&failure.error),
        ]);
    }
    table
}

fn content_chars(record: &EmbeddingRecord) -> String {
    record
        .content
        .as_ref()
        .map_or_else(|| "-".to_string(), |c| c.chars().count().to_string())
}

/// First line of `content`, cut at a character boundary.
pub fn preview(content: Option<&str>) -> String {
    let Some(content) = content else {
        return "-".to_string();
    };
    let line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    truncate_text(line.trim(), PREVIEW_CHARS)
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Respect `NO_COLOR` and dumb terminals.
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::IngestFailure;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate_text("短文", 10), "短文");
        assert_eq!(truncate_text("這是一段很長很長的中文句子", 6), "這是一...");
    }

    #[test]
    fn test_preview_skips_blank_lines() {
        assert_eq!(preview(Some("\n\n  Title line\nbody")), "Title line");
        assert_eq!(preview(None), "-");
    }

    #[test]
    fn test_results_table_lists_every_result() {
        let results = vec![
            SimilarityResult {
                id: "rust".to_string(),
                score: 0.98765,
                content: Some("Rust post".to_string()),
            },
            SimilarityResult {
                id: "go".to_string(),
                score: 0.1,
                content: None,
            },
        ];
        let rendered = results_table(&results).to_string();
        assert!(rendered.contains("rust"));
        assert!(rendered.contains("0.9877"));
        assert!(rendered.contains("go"));
    }

    #[test]
    fn test_report_table() {
        temp_env::with_var("NO_COLOR", Some("1"), || {
            let report = IngestionReport {
                stored: vec!["new-post".to_string()],
                skipped: vec!["old-post".to_string()],
                failed: vec![IngestFailure {
                    entry: "broken.md".to_string(),
                    error: "Embedding service error: 429".to_string(),
                }],
            };
            let rendered = report_table(&report).to_string();
            assert!(rendered.contains("new-post"));
            assert!(rendered.contains("already embedded"));
            assert!(rendered.contains("broken.md"));
        });
    }
}

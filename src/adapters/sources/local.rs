//! Local directory as a document source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::ports::{DocumentSource, SourceEntry};

/// Every regular file under `root`, recursively, in path order.
/// Hidden files and directories are ignored.
pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[async_trait]
impl DocumentSource for LocalDirSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn list(&self, limit: Option<usize>) -> RagResult<Vec<SourceEntry>> {
        let mut pending = vec![self.root.clone()];
        let mut files = Vec::new();

        while let Some(dir) = pending.pop() {
            let mut reader = fs::read_dir(&dir).await.map_err(|e| {
                RagError::Source(format!("cannot read directory {}: {e}", dir.display()))
            })?;
            while let Some(entry) = reader
                .next_entry()
                .await
                .map_err(|e| RagError::Source(format!("cannot read {}: {e}", dir.display())))?
            {
                let name = entry.file_name().to_string_lossy().into_owned();
                if is_hidden(&name) {
                    continue;
                }
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| RagError::Source(format!("cannot stat {name}: {e}")))?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    files.push((entry.path(), name));
                }
            }
        }

        // The whole tree is read so the cap applies to path order.
        files.sort();
        Ok(files
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(path, name)| SourceEntry::new(name, path.to_string_lossy().into_owned()))
            .collect())
    }

    async fn fetch(&self, entry: &SourceEntry) -> RagResult<String> {
        fs::read_to_string(&entry.location)
            .await
            .map_err(|e| RagError::Source(format!("cannot read {}: {e}", entry.location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[tokio::test]
    async fn test_lists_recursively_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("b.md"), "B").unwrap();
        std_fs::write(dir.path().join("a.md"), "A").unwrap();
        std_fs::create_dir(dir.path().join("2024")).unwrap();
        std_fs::write(dir.path().join("2024").join("c.md"), "C").unwrap();
        std_fs::write(dir.path().join(".DS_Store"), "junk").unwrap();

        let source = LocalDirSource::new(dir.path());
        let names: Vec<String> = source
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["c.md", "a.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_limit_keeps_first_paths() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.md", "a.md", "b.md"] {
            std_fs::write(dir.path().join(name), name).unwrap();
        }

        let source = LocalDirSource::new(dir.path());
        let names: Vec<String> = source
            .list(Some(2))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("post.md"), "Hello\n\nWorld").unwrap();

        let source = LocalDirSource::new(dir.path());
        let entries = source.list(None).await.unwrap();
        assert_eq!(source.fetch(&entries[0]).await.unwrap(), "Hello\n\nWorld");
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let source = LocalDirSource::new("/definitely/not/here");
        assert!(matches!(source.list(None).await, Err(RagError::Source(_))));
    }
}

//! Corpus sources.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, RetrievalError};

/// Supplies the ordered document chunks the engine fits on
pub trait CorpusSource {
    fn load(&self) -> Result<Vec<String>>;
}

impl CorpusSource for Vec<String> {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Metadata about a corpus file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataInfo {
    pub exists: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Flat UTF-8 text file, one chunk per blank-line separated block
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split text on `"\n\n"`, trimming chunks and dropping empty ones
    pub fn chunk_text(content: &str) -> Vec<String> {
        content
            .split("\n\n")
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn info(&self) -> DataInfo {
        match std::fs::metadata(&self.path) {
            Ok(meta) => DataInfo {
                exists: true,
                size: meta.len(),
                modified: meta.modified().ok(),
            },
            Err(_) => DataInfo {
                exists: false,
                size: 0,
                modified: None,
            },
        }
    }
}

impl CorpusSource for TextFileSource {
    /// A missing file is an empty corpus; other I/O failures are errors.
    fn load(&self) -> Result<Vec<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "corpus file not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(RetrievalError::io(&self.path, e)),
        };
        let chunks = Self::chunk_text(&content);
        debug!(path = %self.path.display(), chunks = chunks.len(), "corpus loaded");
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_split_on_blank_lines() {
        let text = "  First chunk.\nstill first \n\nSecond.\n\n\n\n   \n\nThird.";
        assert_eq!(
            TextFileSource::chunk_text(text),
            vec!["First chunk.\nstill first", "Second.", "Third."]
        );
    }

    #[test]
    fn missing_file_is_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let source = TextFileSource::new(dir.path().join("absent.txt"));
        assert!(source.load().unwrap().is_empty());
        let info = source.info();
        assert!(!info.exists);
        assert_eq!(info.size, 0);
        assert!(info.modified.is_none());
    }

    #[test]
    fn file_is_loaded_and_described() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_texts.txt");
        std::fs::write(&path, "Alpha.\n\nBeta.\n").unwrap();
        let source = TextFileSource::new(&path);
        assert_eq!(source.load().unwrap(), vec!["Alpha.", "Beta."]);
        let info = source.info();
        assert!(info.exists);
        assert_eq!(info.size, 14);
    }

    #[test]
    fn directory_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextFileSource::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, RetrievalError::Io { .. }));
    }

    #[test]
    fn vec_source_returns_itself() {
        let docs = vec!["one".to_string(), "two".to_string()];
        assert_eq!(docs.load().unwrap(), docs);
    }
}

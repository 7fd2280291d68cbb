use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::traits::CorpusProvider;
use crate::types::Corpus;

/// Loads every `.txt` file under a directory into a [`Corpus`].
///
/// Files are visited in sorted path order and keyed by their path relative
/// to the root, so top-level files are keyed by their file name.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
    limit: Option<usize>,
}

impl DirectoryCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), limit: None }
    }

    /// Only load the first `limit` files (in sorted order).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(path = %file_path.display(), "file is not valid UTF-8, decoding lossily");
                Ok(String::from_utf8_lossy(&fs::read(file_path)?).into_owned())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn doc_id(&self, file_path: &Path) -> String {
        let relative = file_path.strip_prefix(&self.root).unwrap_or(file_path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn list_txt_files(&self) -> Result<Vec<PathBuf>> {
        let mut txt_files = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root).into_iter() {
            let entry = entry.map_err(|e| Error::Operation(format!("walking {}: {}", self.root.display(), e)))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt") {
                txt_files.push(path.to_path_buf());
            }
        }
        txt_files.sort();
        Ok(txt_files)
    }
}

impl CorpusProvider for DirectoryCorpus {
    fn load(&self) -> Result<Corpus> {
        if !self.root.exists() {
            tracing::info!(root = %self.root.display(), "corpus directory does not exist, corpus is empty");
            return Ok(Corpus::new());
        }
        if !self.root.is_dir() {
            return Err(Error::NotFound(format!("{} is not a directory", self.root.display())));
        }

        let mut files = self.list_txt_files()?;
        if let Some(limit) = self.limit {
            if files.len() > limit {
                tracing::info!(limit, total = files.len(), "limiting corpus files");
                files.truncate(limit);
            }
        }

        let mut corpus = Corpus::new();
        for file_path in &files {
            let content = self.read_file_content(file_path)?;
            tracing::debug!(path = %file_path.display(), chars = content.chars().count(), "loaded corpus file");
            corpus.insert(self.doc_id(file_path), content);
        }
        tracing::info!(root = %self.root.display(), documents = corpus.len(), "corpus loaded");
        Ok(corpus)
    }
}

// crates/dalemeta-core/src/emit.rs

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Buffered set of rendered output documents. Everything is rendered before
/// anything touches the filesystem, so a failure part-way through a
/// conversion never publishes an inconsistent document set.
#[derive(Debug, Default)]
pub struct DocumentSet {
    documents: Vec<Document>,
}

#[derive(Debug)]
struct Document {
    filename: String,
    body: String,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one value to YAML and buffers it under the given filename.
    pub fn render<T: Serialize>(&mut self, filename: impl Into<String>, value: &T) -> Result<()> {
        let body = serde_yaml::to_string(value)?;
        self.documents.push(Document {
            filename: filename.into(),
            body,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|doc| doc.filename.as_str())
    }

    /// Writes the whole buffered set under `out_dir`, creating it if needed.
    pub fn write_all(&self, out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir)?;
        for doc in &self.documents {
            fs::write(out_dir.join(&doc.filename), &doc.body)?;
        }
        Ok(())
    }
}

use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::types::Document;

/// Recursively load every text document under `root`.
///
/// Files are selected by the configured extensions and returned in sorted
/// path order so repeated runs see the corpus in the same sequence. The
/// `source` of each document is its path relative to `root`. Finding nothing
/// is [`IngestError::EmptyCorpus`] - an empty walk must never look like a
/// successful load.
pub fn load_corpus(root: &Path, cfg: &IngestConfig) -> Result<Vec<Document>, IngestError> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| IngestError::Io {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| cfg.extensions.iter().any(|e| e == ext));
        if matches {
            paths.push(entry.into_path());
        }
    }

    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(&path).map_err(|e| IngestError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let source = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        debug!(source = %source, bytes = text.len(), "corpus_document_loaded");
        documents.push(Document { text, source });
    }

    if documents.is_empty() {
        return Err(IngestError::EmptyCorpus(root.display().to_string()));
    }

    info!(documents = documents.len(), root = %root.display(), "corpus_loaded");
    Ok(documents)
}

//! Reference CVs stored on the server and used as the benchmark in the prompt.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::document::{extract_text_from_file, DocumentError};

/// Placed between consecutive reference CVs in the prompt.
pub const EXAMPLE_SEPARATOR: &str = "\n\n--- END OF ONE EXAMPLE, START OF THE NEXT ---\n\n";

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("no reference CVs configured")]
    NoneConfigured,

    #[error("reference CV '{path}' could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("reference CV '{path}' is empty")]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    paths: Vec<PathBuf>,
}

impl ReferenceLibrary {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Extracts every reference CV in order and joins them with [`EXAMPLE_SEPARATOR`].
    /// Files are read on each call, so a replaced file is picked up without a restart.
    pub async fn combined_text(&self) -> Result<String, ReferenceError> {
        if self.paths.is_empty() {
            return Err(ReferenceError::NoneConfigured);
        }

        let mut texts = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let text = extract_text_from_file(path.clone())
                .await
                .map_err(|source| ReferenceError::Unreadable {
                    path: path.clone(),
                    source,
                })?;
            if text.trim().is_empty() {
                return Err(ReferenceError::Empty { path: path.clone() });
            }
            debug!("Loaded reference CV {} ({} chars)", path.display(), text.len());
            texts.push(text);
        }

        Ok(texts.join(EXAMPLE_SEPARATOR))
    }
}

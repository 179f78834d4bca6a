//! InnerSource listing metadata
//!
//! The `innersource.json` record published alongside a portal listing:
//! `title`, `motivation`, `contributions`, `skills`, `logo`, `docs`, and
//! `language` are the documented fields; `participation`, `guidelines`, and
//! `score` ride along in real listings and feed the activity score.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{CrawlError, CrawlResult};

/// Curated listing record for a single repository
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnerSourceMetadata {
    /// Readable project name
    pub title: String,
    /// Why the project is InnerSource and why contributors should care
    pub motivation: String,
    /// Requested contributions (bugfixes, features, documentation, ...)
    pub contributions: Vec<String>,
    /// Skills required to contribute
    pub skills: Vec<String>,
    pub logo: String,
    pub docs: String,
    pub language: String,
    /// Participation stats serialized by upstream crawlers; unused by scoring
    pub participation: String,
    /// Contribution guidelines reference (CONTRIBUTING.md location or text)
    pub guidelines: String,
    /// Activity score, written by the score engine on every crawl
    pub score: i64,
}

/// Curated listing records keyed by repository full name
#[derive(Clone, Debug, Default)]
pub struct MetadataIndex {
    entries: HashMap<String, InnerSourceMetadata>,
}

impl MetadataIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON listing mapping `owner/name` to metadata records
    pub async fn load(path: impl AsRef<Path>) -> CrawlResult<Self> {
        let path = path.as_ref();

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CrawlError::Listing {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;

        let entries: HashMap<String, InnerSourceMetadata> =
            serde_json::from_str(&raw).map_err(|e| CrawlError::Listing {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;

        Ok(Self { entries })
    }

    pub fn insert(&mut self, full_name: impl Into<String>, metadata: InnerSourceMetadata) {
        self.entries.insert(full_name.into(), metadata);
    }

    /// Returns the curated record for a repository, or a default one
    #[must_use]
    pub fn get_or_default(&self, full_name: &str) -> InnerSourceMetadata {
        self.entries.get(full_name).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Reference example corpus: the curated write-ups retrieval ranks against.
//!
//! A `Corpus` is immutable once loaded. `CorpusHandle` owns the current
//! snapshot and replaces it wholesale on reload, so readers never see a
//! partially populated corpus.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Section layout and voice of a reference write-up. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleStructure {
    pub sections: Vec<String>,
    pub style: Option<String>,
    pub tone: Option<String>,
}

/// One curated reference write-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub structure: ExampleStructure,
    #[serde(default)]
    pub writeup: String,
}

/// On-disk layout of the corpus document.
#[derive(Debug, Deserialize)]
struct CorpusDocument {
    examples: Vec<Example>,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An immutable, ordered set of reference examples.
#[derive(Debug, Clone)]
pub struct Corpus {
    examples: Vec<Example>,
    loaded_at: DateTime<Utc>,
}

impl Corpus {
    /// Builds a corpus from in-memory examples. Later duplicates of an id are dropped.
    pub fn new(examples: Vec<Example>) -> Self {
        let mut seen = HashSet::new();
        let examples = examples
            .into_iter()
            .filter(|e| {
                let fresh = seen.insert(e.id.clone());
                if !fresh {
                    warn!("Duplicate example id '{}' in corpus; keeping the first", e.id);
                }
                fresh
            })
            .collect();

        Self {
            examples,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Loads the corpus from a JSON document with an `examples` list.
    ///
    /// Never fails: a missing or malformed source yields an empty corpus and a warning.
    pub fn load(source: &Path) -> Self {
        match read_examples(source) {
            Ok(examples) => {
                let corpus = Self::new(examples);
                info!(
                    "Loaded {} reference examples from {}",
                    corpus.len(),
                    source.display()
                );
                corpus
            }
            Err(e) => {
                warn!("{e}; continuing with an empty example corpus");
                Self::empty()
            }
        }
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn read_examples(source: &Path) -> Result<Vec<Example>, CorpusError> {
    let raw = std::fs::read_to_string(source).map_err(|e| CorpusError::Io {
        path: source.display().to_string(),
        source: e,
    })?;
    let document: CorpusDocument =
        serde_json::from_str(&raw).map_err(|e| CorpusError::Parse {
            path: source.display().to_string(),
            source: e,
        })?;
    Ok(document.examples)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared handle
// ────────────────────────────────────────────────────────────────────────────

/// Shared owner of the current corpus snapshot.
///
/// Readers clone the inner `Arc` and score against it without holding the lock.
/// `reload` builds the replacement first and swaps it in one write.
#[derive(Debug)]
pub struct CorpusHandle {
    source: Option<PathBuf>,
    current: RwLock<Arc<Corpus>>,
}

impl CorpusHandle {
    /// Loads the corpus from `source` and remembers the path for reloads.
    pub fn open(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let corpus = Corpus::load(&source);
        Self {
            source: Some(source),
            current: RwLock::new(Arc::new(corpus)),
        }
    }

    /// Wraps an in-memory corpus. `reload` on such a handle keeps the current snapshot.
    pub fn from_corpus(corpus: Corpus) -> Self {
        Self {
            source: None,
            current: RwLock::new(Arc::new(corpus)),
        }
    }

    pub fn snapshot(&self) -> Arc<Corpus> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Re-reads the source and swaps the new corpus in. Returns the new snapshot.
    pub fn reload(&self) -> Arc<Corpus> {
        let Some(source) = &self.source else {
            warn!("Corpus reload requested but no source path is configured");
            return self.snapshot();
        };

        let fresh = Arc::new(Corpus::load(source));
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&fresh);
        info!("Reference corpus reloaded: {} examples", fresh.len());
        fresh
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn example(
        id: &str,
        theme: Option<&str>,
        keywords: &[&str],
        topics: &[&str],
    ) -> Example {
        Example {
            id: id.to_string(),
            title: format!("Example {id}"),
            theme: theme.map(str::to_string),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            key_topics: topics.iter().map(|t| t.to_string()).collect(),
            structure: ExampleStructure::default(),
            writeup: format!("Write-up for {id}."),
        }
    }

    fn write_corpus(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_load_valid_document() {
        let file = write_corpus(
            r#"{"examples": [
                {"id": "A", "title": "Cost story", "theme": "cost_optimization",
                 "keywords": ["cost"], "keyTopics": ["budget"],
                 "structure": {"sections": ["Context", "Result"], "style": "narrative", "tone": "confident"},
                 "writeup": "We saved RM10 Mil..."},
                {"id": "B"}
            ]}"#,
        );
        let corpus = Corpus::load(file.path());
        assert_eq!(corpus.len(), 2);
        let a = &corpus.examples()[0];
        assert_eq!(a.key_topics, vec!["budget"]);
        assert_eq!(a.structure.sections, vec!["Context", "Result"]);
        assert_eq!(a.structure.tone.as_deref(), Some("confident"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let file = write_corpus(r#"{"examples": [{"id": "bare"}]}"#);
        let corpus = Corpus::load(file.path());
        let bare = &corpus.examples()[0];
        assert!(bare.theme.is_none());
        assert!(bare.keywords.is_empty());
        assert!(bare.key_topics.is_empty());
        assert!(bare.structure.sections.is_empty());
        assert!(bare.structure.style.is_none());
        assert_eq!(bare.writeup, "");
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let corpus = Corpus::load(Path::new("/nonexistent/reference_examples.json"));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        let file = write_corpus("{\"examples\": [");
        assert!(Corpus::load(file.path()).is_empty());
    }

    #[test]
    fn test_document_without_examples_field_degrades_to_empty() {
        let file = write_corpus(r#"{"items": []}"#);
        assert!(Corpus::load(file.path()).is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut second = example("A", None, &[], &[]);
        second.title = "Shadow".to_string();
        let corpus = Corpus::new(vec![
            example("A", None, &[], &[]),
            second,
            example("B", None, &[], &[]),
        ]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.examples()[0].title, "Example A");
    }

    #[test]
    fn test_reload_swaps_whole_corpus() {
        let file = write_corpus(r#"{"examples": [{"id": "A"}]}"#);
        let handle = CorpusHandle::open(file.path());
        let before = handle.snapshot();
        assert_eq!(before.len(), 1);

        std::fs::write(file.path(), r#"{"examples": [{"id": "A"}, {"id": "B"}]}"#).unwrap();

        let after = handle.reload();
        assert_eq!(after.len(), 2);
        assert_eq!(handle.snapshot().len(), 2);
        // Snapshots taken before the swap remain intact.
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_reload_of_broken_source_yields_empty_corpus() {
        let file = write_corpus(r#"{"examples": [{"id": "A"}]}"#);
        let handle = CorpusHandle::open(file.path());
        std::fs::write(file.path(), "garbage").unwrap();
        assert!(handle.reload().is_empty());
    }

    #[test]
    fn test_reload_without_source_keeps_snapshot() {
        let handle = CorpusHandle::from_corpus(Corpus::new(vec![example("A", None, &[], &[])]));
        assert_eq!(handle.reload().len(), 1);
        assert!(handle.source().is_none());
    }

    #[test]
    fn test_bundled_corpus_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/reference_examples.json");
        let corpus = Corpus::load(&path);
        assert!(!corpus.is_empty());
        assert!(corpus.examples().iter().all(|e| !e.writeup.is_empty()));
    }
}

//! Retrieval vocabulary: the domain phrase list and theme trigger table.
//!
//! Both tables are versioned configuration data. The compiled-in defaults below
//! match `config/retrieval_vocabulary.json`; a file on disk overrides them.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Domain phrases recognised by the keyword extractor, in match order.
const DEFAULT_PHRASES: &[&str] = &[
    "drilling",
    "decarbonisation",
    "decarbonization",
    "real-time",
    "field support",
    "carbon",
    "emission",
    "flaring",
    "methane",
    "sustainability",
    "renewable",
    "energy transition",
    "cost",
    "saving",
    "budget",
    "efficiency",
    "optimization",
    "optimisation",
    "operational",
    "productivity",
    "downtime",
    "maintenance",
    "automation",
    "digital",
    "technology",
    "innovation",
    "data analytics",
    "machine learning",
    "artificial intelligence",
    "remote monitoring",
    "predictive",
    "safety",
    "production",
    "reservoir",
    "offshore",
    "pipeline",
    "supply chain",
    "procurement",
    "collaboration",
    "transformation",
];

/// Theme category → trigger substrings.
const DEFAULT_THEME_TRIGGERS: &[(&str, &[&str])] = &[
    ("sustainability", &["carbon", "emission", "flaring"]),
    ("technology_innovation", &["technology", "innovation", "system"]),
    (
        "operational_excellence",
        &["operational", "efficiency", "optimization"],
    ),
    ("cost_optimization", &["cost", "saving", "budget"]),
];

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Trigger substrings for one theme category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTriggers {
    pub theme: String,
    pub triggers: Vec<String>,
}

/// The full lexical configuration used by extraction and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub version: u32,
    pub phrases: Vec<String>,
    #[serde(default)]
    pub theme_triggers: Vec<ThemeTriggers>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            version: 1,
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            theme_triggers: DEFAULT_THEME_TRIGGERS
                .iter()
                .map(|(theme, triggers)| ThemeTriggers {
                    theme: theme.to_string(),
                    triggers: triggers.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl Vocabulary {
    /// Loads the vocabulary from `path`, falling back to the compiled-in
    /// default on any read or parse failure.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(vocabulary) => {
                info!(
                    "Loaded retrieval vocabulary v{} ({} phrases, {} themes) from {}",
                    vocabulary.version,
                    vocabulary.phrases.len(),
                    vocabulary.theme_triggers.len(),
                    path.display()
                );
                vocabulary
            }
            Err(e) => {
                warn!("{e}; using built-in retrieval vocabulary");
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let vocabulary: Vocabulary =
            serde_json::from_str(&raw).map_err(|source| VocabularyError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(vocabulary.normalized())
    }

    /// Lower-cases every phrase and trigger, drops blanks, and removes
    /// duplicate phrases while keeping first-definition order. Theme names are kept verbatim.
    pub fn normalized(self) -> Self {
        let mut seen = HashSet::new();
        let phrases = self
            .phrases
            .into_iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();

        let theme_triggers = self
            .theme_triggers
            .into_iter()
            .map(|t| ThemeTriggers {
                theme: t.theme,
                triggers: t
                    .triggers
                    .into_iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
            })
            .collect();

        Self {
            version: self.version,
            phrases,
            theme_triggers,
        }
    }

    /// Trigger list for a theme tag, if the theme is known.
    pub fn triggers_for(&self, theme: &str) -> Option<&[String]> {
        self.theme_triggers
            .iter()
            .find(|t| t.theme == theme)
            .map(|t| t.triggers.as_slice())
    }
}

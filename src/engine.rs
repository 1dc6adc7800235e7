//! Engine facade: exact prefix completion from the trie, optionally blended
//! with typo corrections.

use serde::Serialize;

use crate::{
    error::Result,
    trie::{normalize, Trie, TrieStats},
    typo::{CorrectionType, TypoConfig, TypoCorrector},
};

pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineConfig {
    pub typo: TypoConfig,
    /// Run typo correction when exact search finds nothing, even if the
    /// caller didn't ask for it.
    pub typo_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub typo_tolerance: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            typo_tolerance: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Exact,
    TypoCorrection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub word: String,
    pub frequency: u64,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_distance: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_type: Option<CorrectionType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// The normalized query.
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub typo_tolerance_used: bool,
    pub exact_matches: usize,
    pub typo_corrections: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    trie: Trie,
    corrector: TypoCorrector,
    typo_fallback: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: EngineConfig) -> Result<Self> {
        Ok(Self {
            trie: Trie::new(),
            corrector: TypoCorrector::new(cfg.typo)?,
            typo_fallback: cfg.typo_fallback,
        })
    }

    pub fn insert(&mut self, word: &str, frequency: u64) -> Result<()> {
        self.trie.insert(word, frequency)
    }

    pub fn increment_frequency(&mut self, word: &str, delta: u64) -> Result<u64> {
        self.trie.increment_frequency(word, delta)
    }

    pub fn get_frequency(&self, word: &str) -> u64 {
        self.trie.get_frequency(word)
    }

    pub fn get_stats(&self) -> TrieStats {
        self.trie.get_stats()
    }

    pub fn typo_config(&self) -> TypoConfig {
        self.corrector.config()
    }

    pub fn set_typo_config(&mut self, cfg: TypoConfig) -> Result<()> {
        self.corrector.set_config(cfg)
    }

    /// Number of distinct words indexed.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn search(&self, query: &str, opts: SearchOptions) -> SearchResults {
        let query = normalize(query);

        let mut suggestions: Vec<Suggestion> = self
            .trie
            .search(&query, opts.limit)
            .into_iter()
            .map(|c| Suggestion {
                word: c.word,
                frequency: c.frequency,
                kind: SuggestionType::Exact,
                edit_distance: None,
                similarity: None,
                original_query: None,
                correction_type: None,
            })
            .collect();
        let exact_matches = suggestions.len();

        let use_typo =
            opts.typo_tolerance || (self.typo_fallback && exact_matches == 0 && !query.is_empty());

        let mut typo_corrections = 0;
        if use_typo && suggestions.len() < opts.limit {
            // At most `exact_matches` of these can be duplicates, so asking for
            // `limit` always leaves enough to fill the remaining slots.
            for c in self.corrector.correct(&self.trie, &query, opts.limit) {
                if suggestions.len() >= opts.limit {
                    break;
                }
                if suggestions[..exact_matches].iter().any(|s| s.word == c.word) {
                    continue;
                }

                suggestions.push(Suggestion {
                    word: c.word,
                    frequency: c.frequency,
                    kind: SuggestionType::TypoCorrection,
                    edit_distance: Some(c.edit_distance),
                    similarity: Some(c.similarity),
                    original_query: Some(query.clone()),
                    correction_type: Some(c.correction_type),
                });
                typo_corrections += 1;
            }
        }

        SearchResults {
            query,
            suggestions,
            typo_tolerance_used: use_typo,
            exact_matches,
            typo_corrections,
        }
    }
}

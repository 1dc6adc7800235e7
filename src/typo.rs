//! "Did you mean" corrections: scans the vocabulary for words within a bounded
//! Levenshtein distance of the query and ranks them by closeness, then
//! popularity.

use std::{cmp::Ordering, mem};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    heap::top_k,
    trie::{normalize, Trie},
};

pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Bounds applied to every typo search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypoConfig {
    pub max_edit_distance: usize,
    pub similarity_threshold: f64,
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl TypoConfig {
    /// Build a config from untrusted values, e.g. an admin request.
    pub fn new(max_edit_distance: i64, similarity_threshold: f64) -> Result<Self> {
        let max_edit_distance = usize::try_from(max_edit_distance).map_err(|_| {
            Error::InvalidConfig(format!(
                "maxEditDistance must be >= 0, got {}",
                max_edit_distance
            ))
        })?;

        let cfg = Self {
            max_edit_distance,
            similarity_threshold,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::InvalidConfig(format!(
                "similarityThreshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}

/// Kind of edits that turn the query into the suggested word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionType {
    None,
    Insertion,
    Deletion,
    Substitution,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypoCandidate {
    pub word: String,
    pub frequency: u64,
    pub edit_distance: usize,
    pub similarity: f64,
    pub correction_type: CorrectionType,
}

/// Stateless apart from its config; reads the vocabulary from a [`Trie`].
#[derive(Debug, Clone, Default)]
pub struct TypoCorrector {
    config: TypoConfig,
}

#[derive(Clone)]
struct Scored<'a> {
    word: &'a str,
    frequency: u64,
    distance: usize,
    similarity: f64,
}

/// Closer first, then more frequent, then alphabetical.
fn by_closeness(a: &Scored, b: &Scored) -> Ordering {
    b.distance
        .cmp(&a.distance)
        .then_with(|| a.frequency.cmp(&b.frequency))
        .then_with(|| b.word.cmp(a.word))
}

impl TypoCorrector {
    pub fn new(config: TypoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> TypoConfig {
        self.config
    }

    pub fn set_config(&mut self, config: TypoConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Up to `limit` vocabulary words close to `query`.
    pub fn correct(&self, trie: &Trie, query: &str, limit: usize) -> Vec<TypoCandidate> {
        let query = normalize(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let max = self.config.max_edit_distance;
        let query_len = query.chars().count();

        let mut matches = Vec::new();
        for (word, frequency) in trie.words() {
            let word_len = word.chars().count();

            // The distance is at least the length difference.
            if word_len.abs_diff(query_len) > max {
                continue;
            }

            let Some(distance) = bounded_levenshtein(&query, word, max) else {
                continue;
            };

            let similarity = similarity(distance, query_len, word_len);
            if similarity < self.config.similarity_threshold {
                continue;
            }

            matches.push(Scored {
                word,
                frequency,
                distance,
                similarity,
            });
        }

        top_k(&matches, limit, by_closeness)
            .into_iter()
            .map(|m| TypoCandidate {
                word: m.word.to_string(),
                frequency: m.frequency,
                edit_distance: m.distance,
                similarity: m.similarity,
                correction_type: classify_edits(&query, m.word),
            })
            .collect()
    }
}

/// `1 - distance / max(len_a, len_b)`, lengths in chars.
pub fn similarity(distance: usize, len_a: usize, len_b: usize) -> f64 {
    let longest = len_a.max(len_b);
    if longest == 0 {
        return 1.0;
    }
    1.0 - distance as f64 / longest as f64
}

/// Levenshtein distance between `a` and `b`, or `None` if it exceeds `max`.
///
/// Only the diagonal band of width `2 * max + 1` is evaluated and the scan
/// stops as soon as a whole row is above `max`.
pub fn bounded_levenshtein(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(a.len().max(b.len()));
    }

    let over = max + 1;
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let row = i + 1;
        let lo = row.saturating_sub(max).max(1);
        let hi = (row + max).min(b.len());

        curr[0] = row;
        if lo > 1 {
            curr[lo - 1] = over;
        }

        let mut row_min = curr[lo - 1];
        for j in lo..=hi {
            let cost = usize::from(ca != b[j - 1]);
            let v = (prev[j - 1] + cost).min(prev[j] + 1).min(curr[j - 1] + 1);
            curr[j] = v;
            row_min = row_min.min(v);
        }
        if hi < b.len() {
            curr[hi + 1] = over;
        }

        if row_min > max {
            return None;
        }
        mem::swap(&mut prev, &mut curr);
    }

    let d = prev[b.len()];
    (d <= max).then_some(d)
}

/// Classify the edits turning `from` into `to` by backtracing the full
/// edit-distance matrix. Matches are preferred over substitutions, then
/// insertions, then deletions.
pub fn classify_edits(from: &str, to: &str) -> CorrectionType {
    let a: Vec<char> = from.chars().collect();
    let b: Vec<char> = to.chars().collect();
    let (n, m) = (a.len(), b.len());

    let mut d = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        d[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j - 1] + cost)
                .min(d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1);
        }
    }

    let (mut ins, mut del, mut sub) = (false, false, false);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] && d[i][j] == d[i - 1][j - 1] {
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && d[i][j] == d[i - 1][j - 1] + 1 {
            sub = true;
            i -= 1;
            j -= 1;
        } else if j > 0 && d[i][j] == d[i][j - 1] + 1 {
            ins = true;
            j -= 1;
        } else {
            del = true;
            i -= 1;
        }
    }

    match (ins, del, sub) {
        (false, false, false) => CorrectionType::None,
        (true, false, false) => CorrectionType::Insertion,
        (false, true, false) => CorrectionType::Deletion,
        (false, false, true) => CorrectionType::Substitution,
        _ => CorrectionType::Mixed,
    }
}

//! Prefix tree over a vocabulary of words with per-word frequencies.
//!
//! Nodes live in a flat arena and refer to their children by index. The root
//! is always node 0. Nodes are never removed.

use serde::Serialize;

use crate::{
    error::{Error, Result},
    heap::{get_top_k_from_array, Candidate},
};

pub type NodeId = u32;

const ROOT: NodeId = 0;

/// Normalize a word or prefix: trim surrounding whitespace and lowercase.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Default, Clone)]
struct Node {
    /// Sorted by char.
    children: Vec<(char, NodeId)>,
    /// Set iff the node terminates an inserted word.
    word: Option<String>,
    frequency: u64,
}

impl Node {
    fn child(&self, c: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|i| self.children[i].1)
    }

    fn is_terminal(&self) -> bool {
        self.word.is_some()
    }
}

/// Diagnostic counters collected by a full traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrieStats {
    pub word_count: usize,
    pub node_count: usize,
    pub max_depth: usize,
    /// Mean depth of terminal nodes, i.e. mean word length in chars.
    pub average_depth: f64,
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    word_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            word_count: 0,
        }
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a word with the given frequency. Re-inserting an existing word
    /// overwrites its frequency.
    pub fn insert(&mut self, word: &str, frequency: u64) -> Result<()> {
        let word = normalize(word);
        if word.is_empty() {
            return Err(Error::InvalidInput("word must not be empty".to_string()));
        }

        let mut cur = ROOT;
        for c in word.chars() {
            cur = match self.nodes[cur as usize].child(c) {
                Some(id) => id,
                None => self.add_child(cur, c),
            };
        }

        let node = &mut self.nodes[cur as usize];
        if !node.is_terminal() {
            node.word = Some(word);
            self.word_count += 1;
        }
        node.frequency = frequency;

        Ok(())
    }

    /// Add `delta` to the frequency of an existing word and return the new value.
    pub fn increment_frequency(&mut self, word: &str, delta: u64) -> Result<u64> {
        let key = normalize(word);
        if key.is_empty() {
            return Err(Error::InvalidInput("word must not be empty".to_string()));
        }

        let node = self
            .find(&key)
            .map(|id| &mut self.nodes[id as usize])
            .filter(|n| n.is_terminal())
            .ok_or(Error::NotFound(key))?;

        node.frequency = node.frequency.saturating_add(delta);
        Ok(node.frequency)
    }

    /// Frequency of a word, or 0 if it isn't stored.
    pub fn get_frequency(&self, word: &str) -> u64 {
        self.terminal(&normalize(word)).map_or(0, |n| n.frequency)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.terminal(&normalize(word)).is_some()
    }

    /// Up to `limit` words starting with `prefix`, highest frequency first.
    /// An unknown prefix yields an empty result.
    pub fn search(&self, prefix: &str, limit: usize) -> Vec<Candidate> {
        if limit == 0 {
            return Vec::new();
        }

        let prefix = normalize(prefix);
        match self.find(&prefix) {
            Some(start) => get_top_k_from_array(&self.collect(start), limit),
            None => Vec::new(),
        }
    }

    /// Every stored word with its frequency, in arena order.
    pub fn words(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.word.as_deref().map(|w| (w, n.frequency)))
    }

    pub fn get_stats(&self) -> TrieStats {
        let mut max_depth = 0;
        let mut depth_sum = 0;
        let mut stack = vec![(ROOT, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id as usize];
            max_depth = max_depth.max(depth);
            if node.is_terminal() {
                depth_sum += depth;
            }
            stack.extend(node.children.iter().map(|&(_, child)| (child, depth + 1)));
        }

        let average_depth = if self.word_count == 0 {
            0.0
        } else {
            depth_sum as f64 / self.word_count as f64
        };

        TrieStats {
            word_count: self.word_count,
            node_count: self.nodes.len(),
            max_depth,
            average_depth,
        }
    }

    /// Walk from the root along `key`. `key` must already be normalized.
    fn find(&self, key: &str) -> Option<NodeId> {
        key.chars()
            .try_fold(ROOT, |id, c| self.nodes[id as usize].child(c))
    }

    fn terminal(&self, key: &str) -> Option<&Node> {
        if key.is_empty() {
            return None;
        }
        self.find(key)
            .map(|id| &self.nodes[id as usize])
            .filter(|n| n.is_terminal())
    }

    /// All terminal nodes under `start` (inclusive), unordered.
    fn collect(&self, start: NodeId) -> Vec<Candidate> {
        let mut out = Vec::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if let Some(word) = &node.word {
                out.push(Candidate::new(word.as_str(), node.frequency));
            }
            stack.extend(node.children.iter().map(|&(_, child)| child));
        }

        out
    }

    fn add_child(&mut self, parent: NodeId, c: char) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::default());

        let children = &mut self.nodes[parent as usize].children;
        let pos = children.partition_point(|&(k, _)| k < c);
        children.insert(pos, (c, id));

        id
    }
}

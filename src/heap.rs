//! Binary max-heap with a pluggable comparator, and the bounded top-K
//! selection built on it that ranks every result list in the crate.

use std::cmp::Ordering;

use serde::Serialize;

/// Inputs at or below this size are ranked with a plain sort.
const SORT_THRESHOLD: usize = 64;

/// A word and its frequency, as collected from the trie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub word: String,
    pub frequency: u64,
}

impl Candidate {
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// Default ranking: higher frequency first, ties broken by ascending word order.
/// `Ordering::Greater` means `a` ranks above `b`.
pub fn by_frequency(a: &Candidate, b: &Candidate) -> Ordering {
    a.frequency
        .cmp(&b.frequency)
        .then_with(|| b.word.cmp(&a.word))
}

/// Array-backed binary max-heap. The comparator decides what "max" means:
/// the item for which it returns `Greater` against all others is popped first.
pub struct MaxHeap<T, F> {
    items: Vec<T>,
    cmp: F,
}

impl MaxHeap<Candidate, fn(&Candidate, &Candidate) -> Ordering> {
    /// Heap over candidates using the default frequency ranking.
    pub fn by_frequency() -> Self {
        Self::new(by_frequency)
    }
}

impl<T, F> MaxHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(cmp: F) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Push an item. O(log n).
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the highest ranked item. O(log n).
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let top = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// Drain the heap into a vector ranked best-first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if (self.cmp)(&self.items[i], &self.items[parent]) != Ordering::Greater {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;

            if left < len && (self.cmp)(&self.items[left], &self.items[best]) == Ordering::Greater {
                best = left;
            }
            if right < len && (self.cmp)(&self.items[right], &self.items[best]) == Ordering::Greater
            {
                best = right;
            }
            if best == i {
                break;
            }

            self.items.swap(i, best);
            i = best;
        }
    }
}

/// Select the `k` highest ranked items from `items`, best-first.
///
/// Returns exactly `min(k, items.len())` items and never touches the input.
/// Small inputs are sorted outright; larger ones go through a heap bounded to
/// `k` entries, O(n log k).
pub fn top_k<T, F>(items: &[T], k: usize, cmp: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if k == 0 || items.is_empty() {
        return Vec::new();
    }

    if k >= items.len() || items.len() <= SORT_THRESHOLD {
        let mut out = items.to_vec();
        out.sort_by(|a, b| cmp(b, a));
        out.truncate(k);
        return out;
    }

    // Reversed comparator: the worst of the current k sits on top.
    let mut heap = MaxHeap::with_capacity(k, |a: &T, b: &T| cmp(b, a));
    for item in items {
        if heap.len() < k {
            heap.push(item.clone());
            continue;
        }

        let better = heap
            .peek()
            .is_some_and(|worst| cmp(item, worst) == Ordering::Greater);
        if better {
            heap.pop();
            heap.push(item.clone());
        }
    }

    let mut out = heap.into_sorted_vec();
    out.reverse();
    out
}

/// Top-K over candidates with the default frequency ranking.
pub fn get_top_k_from_array(items: &[Candidate], k: usize) -> Vec<Candidate> {
    top_k(items, k, by_frequency)
}

// Property tests for the trie and the top-K selector.

use std::collections::HashMap;

use quickcheck::{QuickCheck, TestResult};
use typeahead::{
    heap::{by_frequency, get_top_k_from_array, Candidate},
    trie::Trie,
    typo::bounded_levenshtein,
};

/// Keep generated words to a small lowercase alphabet so prefixes collide.
fn word(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| {
            let b = c as u32 % 4;
            char::from_u32('a' as u32 + b)
        })
        .take(8)
        .collect()
}

fn build(entries: &[(String, u32)]) -> (Trie, HashMap<String, u64>) {
    let mut trie = Trie::new();
    let mut expected = HashMap::new();
    for (raw, freq) in entries {
        let w = word(raw);
        if w.is_empty() {
            continue;
        }
        trie.insert(&w, *freq as u64).unwrap();
        expected.insert(w, *freq as u64);
    }
    (trie, expected)
}

#[test]
fn prop_every_prefix_finds_word() {
    fn prop(entries: Vec<(String, u32)>) -> TestResult {
        let (trie, expected) = build(&entries);
        if expected.is_empty() {
            return TestResult::discard();
        }

        for (w, f) in &expected {
            for end in 0..=w.len() {
                let prefix = &w[..end];
                let hits = trie.search(prefix, expected.len());
                if !hits.iter().any(|c| &c.word == w && c.frequency == *f) {
                    return TestResult::failed();
                }
            }
        }
        TestResult::passed()
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(String, u32)>) -> TestResult);
}

#[test]
fn prop_search_bounded_and_sorted() {
    fn prop(entries: Vec<(String, u32)>, prefix: String, k: u8) -> TestResult {
        let (trie, _) = build(&entries);
        let prefix = word(&prefix);
        let k = k as usize % 10;

        let hits = trie.search(&prefix, k);
        if hits.len() > k {
            return TestResult::failed();
        }
        let sorted = hits
            .windows(2)
            .all(|w| by_frequency(&w[0], &w[1]) == std::cmp::Ordering::Greater);

        TestResult::from_bool(sorted && hits == trie.search(&prefix, k))
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(String, u32)>, String, u8) -> TestResult);
}

#[test]
fn prop_top_k_matches_full_sort() {
    fn prop(items: Vec<(String, u8)>, k: u8) -> TestResult {
        let items: Vec<Candidate> = items
            .into_iter()
            .map(|(w, f)| Candidate::new(w, f as u64))
            .collect();
        let k = k as usize;
        let before = items.clone();

        let out = get_top_k_from_array(&items, k);

        let mut expected = items.clone();
        expected.sort_by(|a, b| by_frequency(b, a));
        expected.truncate(k);

        TestResult::from_bool(items == before && out.len() == k.min(items.len()) && out == expected)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<(String, u8)>, u8) -> TestResult);
}

#[test]
fn prop_levenshtein_symmetric_and_bounded() {
    fn prop(a: String, b: String, max: u8) -> TestResult {
        let (a, b) = (word(&a), word(&b));
        let max = max as usize % 5;

        let ab = bounded_levenshtein(&a, &b, max);
        let ba = bounded_levenshtein(&b, &a, max);
        let in_bound = ab.is_none_or(|d| d <= max && d >= a.len().abs_diff(b.len()));

        TestResult::from_bool(ab == ba && in_bound)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(String, String, u8) -> TestResult);
}

//! In-memory autocomplete: a frequency-ranked prefix trie with optional
//! typo-tolerant "did you mean" corrections, and the HTTP service around it.
//!
//! ```
//! use typeahead::engine::{Engine, SearchOptions};
//!
//! let mut engine = Engine::new();
//! engine.insert("apple", 10).unwrap();
//! engine.insert("application", 8).unwrap();
//!
//! let results = engine.search("app", SearchOptions::default());
//! assert_eq!(results.suggestions[0].word, "apple");
//! ```

pub mod engine;
pub mod error;
pub mod handlers;
pub mod heap;
pub mod http;
pub mod importer;
pub mod init;
pub mod models;
pub mod trie;
pub mod typo;

pub use engine::{Engine, EngineConfig, SearchOptions, SearchResults, Suggestion, SuggestionType};
pub use error::Error;

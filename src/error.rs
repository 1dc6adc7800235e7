/// Errors raised by the engine's public operations.
///
/// Every variant is raised before any structural mutation happens, so an
/// error never leaves the trie or the typo configuration half-updated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("word not found: {0}")]
    NotFound(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

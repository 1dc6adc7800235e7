use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub typo: TypoSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub admin_username: String,
    #[serde(default)]
    pub admin_password: String,
    #[serde(default)]
    pub default_limit: usize,
    #[serde(default)]
    pub max_limit: usize,
    /// CSV files (word,frequency) loaded at startup.
    #[serde(default)]
    pub data: Vec<String>,
}

/// Optional so that a later config file only overrides what it sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypoSection {
    #[serde(default)]
    pub max_edit_distance: Option<i64>,
    #[serde(default)]
    pub similarity_threshold: Option<f64>,
    #[serde(default)]
    pub fallback: Option<bool>,
}

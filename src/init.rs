use std::path::{Path, PathBuf};

use crate::{
    engine::{Engine, EngineConfig, DEFAULT_LIMIT},
    importer,
    models::Config,
    typo::{TypoConfig, DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_SIMILARITY_THRESHOLD},
};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_ADDRESS: &str = "0.0.0.0:9000";
const DEFAULT_MAX_LIMIT: usize = 50;

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge zero or more config files, then fill in defaults.
pub fn init_config(paths: &[PathBuf]) -> Config {
    let mut config: Option<Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        match read_config(path) {
            Ok(c) => {
                if let Some(ref mut existing) = config {
                    // Merge configs.
                    merge_config(existing, c);
                } else {
                    config = Some(c);
                }
            }
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let mut config = config.unwrap_or_else(|| {
        log::info!("no config files specified, using defaults");
        Config::default()
    });
    fill_defaults(&mut config);
    config
}

/// Load configuration from TOML file.
fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Generate sample config file.
pub fn generate_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Merge the given src config into the dest config struct.
pub fn merge_config(dest: &mut Config, src: Config) {
    // Merge app config.
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.admin_username.is_empty() {
        dest.app.admin_username = src.app.admin_username;
    }
    if !src.app.admin_password.is_empty() {
        dest.app.admin_password = src.app.admin_password;
    }
    if src.app.default_limit > 0 {
        dest.app.default_limit = src.app.default_limit;
    }
    if src.app.max_limit > 0 {
        dest.app.max_limit = src.app.max_limit;
    }
    if !src.app.data.is_empty() {
        dest.app.data = src.app.data;
    }

    // Merge typo config.
    if src.typo.max_edit_distance.is_some() {
        dest.typo.max_edit_distance = src.typo.max_edit_distance;
    }
    if src.typo.similarity_threshold.is_some() {
        dest.typo.similarity_threshold = src.typo.similarity_threshold;
    }
    if src.typo.fallback.is_some() {
        dest.typo.fallback = src.typo.fallback;
    }
}

fn fill_defaults(config: &mut Config) {
    if config.app.address.is_empty() {
        config.app.address = DEFAULT_ADDRESS.to_string();
    }
    if config.app.max_limit == 0 {
        config.app.max_limit = DEFAULT_MAX_LIMIT;
    }
    if config.app.default_limit == 0 {
        config.app.default_limit = DEFAULT_LIMIT;
    }
    config.app.default_limit = config.app.default_limit.min(config.app.max_limit);
}

/// Build the engine config from the `[typo]` section.
pub fn engine_config(config: &Config) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let typo = TypoConfig::new(
        config
            .typo
            .max_edit_distance
            .unwrap_or(DEFAULT_MAX_EDIT_DISTANCE as i64),
        config
            .typo
            .similarity_threshold
            .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD),
    )?;

    Ok(EngineConfig {
        typo,
        typo_fallback: config.typo.fallback.unwrap_or(false),
    })
}

/// Create the engine and load every configured dataset into it.
pub fn init_engine(
    config: &Config,
    data: &[PathBuf],
) -> Result<Engine, Box<dyn std::error::Error>> {
    let cfg = engine_config(config)?;
    log::info!(
        "typo tolerance: max edit distance {}, similarity threshold {}, fallback {}",
        cfg.typo.max_edit_distance,
        cfg.typo.similarity_threshold,
        cfg.typo_fallback
    );

    let mut engine = Engine::with_config(cfg)?;

    let paths = config.app.data.iter().map(PathBuf::from).chain(data.iter().cloned());
    for path in paths {
        importer::load_csv(&path, &mut engine)?;
    }

    if engine.is_empty() {
        log::warn!("no words loaded");
    } else {
        log::info!("{} words indexed", engine.len());
    }

    Ok(engine)
}

use std::{io::Read, path::Path};

use regex::Regex;
use serde::Serialize;

use crate::engine::Engine;

/// Log progress every N records.
const LOG_EVERY: usize = 50_000;

const COL_WORD: usize = 0;
const COL_FREQUENCY: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub loaded: usize,
    pub skipped: usize,
}

/// Load a `word,frequency` CSV file into the engine.
pub fn load_csv(path: &Path, engine: &mut Engine) -> Result<ImportStats, ImportError> {
    log::info!("importing words from {} ...", path.display());

    let file = std::fs::File::open(path)?;
    let stats = load_reader(file, engine)?;

    log::info!(
        "finished {}. loaded {} words, skipped {} records",
        path.display(),
        stats.loaded,
        stats.skipped
    );
    Ok(stats)
}

/// Load `word,frequency` records from any reader. Malformed records are
/// logged and skipped; only read errors abort the import.
pub fn load_reader<R: Read>(rdr: R, engine: &mut Engine) -> Result<ImportStats, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let re_spaces = Regex::new(r"\s+")?;
    let mut stats = ImportStats::default();

    for (i, result) in reader.records().enumerate() {
        let line = i + 1;
        let record = result?;

        let word = clean_string(record.get(COL_WORD).unwrap_or(""), &re_spaces);
        let freq = record.get(COL_FREQUENCY).unwrap_or("").trim();

        let frequency = if freq.is_empty() {
            0
        } else {
            match freq.parse::<u64>() {
                Ok(f) => f,
                // A non-numeric frequency on the first line is a header row.
                Err(_) if line == 1 => {
                    log::info!("skipping header row");
                    continue;
                }
                Err(_) => {
                    log::warn!("line {}: invalid frequency '{}' at column 1", line, freq);
                    stats.skipped += 1;
                    continue;
                }
            }
        };

        match engine.insert(&word, frequency) {
            Ok(()) => stats.loaded += 1,
            Err(e) => {
                log::warn!("line {}: {}", line, e);
                stats.skipped += 1;
            }
        }

        if line % LOG_EVERY == 0 {
            log::info!("imported {} words", stats.loaded);
        }
    }

    Ok(stats)
}

fn clean_string(s: &str, re_spaces: &Regex) -> String {
    re_spaces.replace_all(s.trim(), " ").to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_reader() {
        let data = "word,frequency\napple,10\nApplication , 8\napply,6\n";
        let mut e = Engine::new();
        let stats = load_reader(data.as_bytes(), &mut e).unwrap();

        assert_eq!(stats, ImportStats { loaded: 3, skipped: 0 });
        assert_eq!(e.get_frequency("application"), 8);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let data = "apple,10\n,5\npear,lots\nfig\n  new   york  ,7\n";
        let mut e = Engine::new();
        let stats = load_reader(data.as_bytes(), &mut e).unwrap();

        assert_eq!(stats, ImportStats { loaded: 3, skipped: 2 });
        assert_eq!(e.get_frequency("fig"), 0);
        assert_eq!(e.search("fi", Default::default()).suggestions.len(), 1);
        assert_eq!(e.get_frequency("new york"), 7);
    }

    #[test]
    fn test_reinsert_overwrites() {
        let data = "apple,10\napple,3\n";
        let mut e = Engine::new();
        load_reader(data.as_bytes(), &mut e).unwrap();
        assert_eq!(e.get_frequency("apple"), 3);
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello,100").unwrap();
        writeln!(file, "help,40").unwrap();
        file.flush().unwrap();

        let mut e = Engine::new();
        let stats = load_csv(file.path(), &mut e).unwrap();
        assert_eq!(stats.loaded, 2);
        assert_eq!(e.get_frequency("help"), 40);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let mut e = Engine::new();
        let err = load_csv(Path::new("/nonexistent/words.csv"), &mut e);
        assert!(matches!(err, Err(ImportError::Io(_))));
    }
}

//! Application configuration constants and settings loading.
//!
//! Defaults live here as constants; `wordbox.toml` (or the file named by
//! `WORDBOX_CONFIG`) overrides them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::Settings;
use crate::error::{LogOnError, Result};

// ==================== Scheduling Defaults ====================

/// Base delay unit in milliseconds (2.4 hours)
pub const DEFAULT_DELAY_MS: i64 = 8_640_000;

/// Delay multipliers by step: step 0 waits one unit, step 7+ waits 1000 units
pub const DEFAULT_FACTOR_FOR_DELAY_VALUE: [u32; 8] = [1, 1, 3, 7, 45, 90, 360, 1000];

/// Step assigned to imported words that carry none
pub const DEFAULT_INITIAL_STEP_VALUE: i64 = -1;

/// Number of multiple choice alternatives, correct answer included
pub const DEFAULT_NUMBER_OF_OPTIONS: usize = 4;

/// Upper bound on `delay` times the largest factor (about 1000 years)
pub const MAX_SCHEDULE_DELAY_MS: i64 = 1000 * 365 * 24 * 60 * 60 * 1000;

// ==================== Session Configuration ====================

/// How long a started session stays valid
pub const DEFAULT_SESSION_EXPIRY_SECONDS: u64 = 1800;

/// Longest accepted session lifetime (30 days)
pub const MAX_SESSION_EXPIRY_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Soft cap on words asked per session
pub const DEFAULT_WORDS_PER_SESSION: usize = 7;

// ==================== Word Lists ====================

/// English/German list shipped with the crate, used when no list is configured
pub const BUNDLED_WORD_LIST: &str = include_str!("../data/wordlist-en-de.json");

// ==================== Config File ====================

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "wordbox.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "WORDBOX_CONFIG";

/// Configuration file structure for wordbox.toml
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub words: WordsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct WordsConfig {
    /// JSON word list to import at startup
    pub path: Option<PathBuf>,
}

/// Parse and validate config text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    config.settings.validate()?;
    Ok(config)
}

/// Config file path with priority: WORDBOX_CONFIG (.env or environment) > default
pub fn config_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            tracing::info!("Using config from {} env: {}", CONFIG_ENV, path);
            PathBuf::from(path)
        }
        Err(_) => PathBuf::from(CONFIG_FILE),
    }
}

/// Load config from `path`, falling back to defaults when the file is missing
/// or invalid.
pub fn load_config_from(path: &Path) -> AppConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No config at {}, using default settings", path.display());
            return AppConfig::default();
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return AppConfig::default();
        }
    };

    parse_config(&contents).log_warn_default(&format!("Ignoring invalid config {}", path.display()))
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

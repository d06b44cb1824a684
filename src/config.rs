//! Configuration management for the lyrics corpus builder.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It covers the Genius API credentials and endpoints
//! as well as the pacing and matching knobs used by the collection stages.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (handled by the CLI layer)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_API_URL: &str = "https://api.genius.com";
pub const DEFAULT_PUBLIC_API_URL: &str = "https://genius.com/api";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `lyricorp/.env`.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/lyricorp/.env`
/// - macOS: `~/Library/Application Support/lyricorp/.env`
/// - Windows: `%LOCALAPPDATA%/lyricorp/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file cannot be read or parsed. A missing file is reported the same way so
/// the caller can decide to carry on with plain environment variables.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lyricorp/.env");
    path
}

/// Returns the Genius client access token, if one is configured.
///
/// Reads `GENIUS_ACCESS_TOKEN`. Blank values count as missing.
pub fn genius_token() -> Option<String> {
    env::var("GENIUS_ACCESS_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Thresholds deciding whether a search result really is the song that was asked for.
///
/// The provider answers a search with its closest match even when the song does
/// not exist, so every result is compared against the query. The title ratio is
/// rounded to two decimals before the comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    pub title: f64,
    pub artist: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            title: 0.93,
            artist: 1.0,
        }
    }
}

/// Runtime settings shared by the Genius client and the pipeline stages.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub public_api_url: String,
    pub per_page: u32,
    pub request_timeout: Duration,
    pub request_delay: Duration,
    pub pause_every: usize,
    pub pause: Duration,
    pub thresholds: MatchThresholds,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            public_api_url: DEFAULT_PUBLIC_API_URL.to_string(),
            per_page: 50,
            request_timeout: Duration::from_secs(200),
            request_delay: Duration::from_millis(750),
            pause_every: 10,
            pause: Duration::from_millis(250),
            thresholds: MatchThresholds::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Builds the settings from environment variables, falling back to the defaults
    /// for anything unset or unparsable.
    ///
    /// | variable | default |
    /// |---|---|
    /// | `GENIUS_API_URL` | `https://api.genius.com` |
    /// | `GENIUS_PUBLIC_API_URL` | `https://genius.com/api` |
    /// | `LYRICORP_PER_PAGE` | 50 |
    /// | `LYRICORP_TIMEOUT_SECS` | 200 |
    /// | `LYRICORP_REQUEST_DELAY_MS` | 750 |
    /// | `LYRICORP_PAUSE_EVERY` | 10 |
    /// | `LYRICORP_PAUSE_MS` | 250 |
    /// | `LYRICORP_TITLE_THRESHOLD` | 0.93 |
    /// | `LYRICORP_ARTIST_THRESHOLD` | 1.0 |
    /// | `LYRICORP_OUTPUT_DIR` | `.` |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env_or("GENIUS_API_URL", defaults.api_url),
            public_api_url: env_or("GENIUS_PUBLIC_API_URL", defaults.public_api_url),
            per_page: env_or("LYRICORP_PER_PAGE", defaults.per_page).clamp(1, 50),
            request_timeout: Duration::from_secs(env_or(
                "LYRICORP_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            request_delay: Duration::from_millis(env_or(
                "LYRICORP_REQUEST_DELAY_MS",
                defaults.request_delay.as_millis() as u64,
            )),
            pause_every: env_or("LYRICORP_PAUSE_EVERY", defaults.pause_every).max(1),
            pause: Duration::from_millis(env_or(
                "LYRICORP_PAUSE_MS",
                defaults.pause.as_millis() as u64,
            )),
            thresholds: MatchThresholds {
                title: env_or("LYRICORP_TITLE_THRESHOLD", defaults.thresholds.title),
                artist: env_or("LYRICORP_ARTIST_THRESHOLD", defaults.thresholds.artist),
            },
            output_dir: env_or("LYRICORP_OUTPUT_DIR", defaults.output_dir),
        }
    }
}

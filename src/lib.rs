//! Lyrics Corpus Builder Library
//!
//! This library scrapes the Genius API for everything an artist has released and
//! turns it into a set of CSV tables: albums, tracks, lyrics (by title and by year),
//! songs the artist performed but did not write, and a single-cell lyrics corpus.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `genius` - Genius API client and the provider abstraction
//! - `pipeline` - The four collection stages and the session they share
//! - `tables` - Reading and writing the exported CSV tables
//! - `types` - Data structures and type definitions
//! - `utils` - Normalization, similarity and naming helpers
//!
//! # Example
//!
//! ```
//! use lyricorp::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> lyricorp::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod genius;
pub mod pipeline;
pub mod tables;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Example
///
/// ```
/// use lyricorp::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Collecting albums for {}", artist);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Exported {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors: the process terminates with exit code 1 right after
/// the message is printed, so tables written by earlier stages are all that
/// survive.
///
/// # Example
///
/// ```
/// error!("Failed to collect albums: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for rows and pages that are skipped without aborting the run.
///
/// # Example
///
/// ```
/// warning!("Lyrics for \"{}\" are not available, skipped", title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

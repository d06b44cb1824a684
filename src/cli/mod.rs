//! # CLI Module
//!
//! This module provides the command-line interface layer for lyricorp. It wires the
//! Genius client, the pipeline stages and the CSV tables together and handles user
//! interaction: prompting for a missing token, progress feedback and error reporting.
//!
//! ## Commands
//!
//! - [`run`] - Runs all four stages for an artist
//! - [`albums`] - Collects the album table
//! - [`tracks`] - Builds the track table from the album table
//! - [`lyrics`] - Resolves lyrics for the track table
//! - [`corpus`] - Builds the corpus from the lyrics table (offline)
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Pipeline Layer (albums, tracks, lyrics, corpus)
//!     ↓
//! Provider Layer (Genius integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Single-stage commands read their input table from the output directory, so a run
//! that died in the lyrics stage can be resumed with `lyricorp lyrics` without
//! fetching albums and tracks again.
//!
//! ## Error Handling Philosophy
//!
//! Rows that cannot be resolved are reported and skipped by the stages themselves.
//! Anything that reaches this layer as an error is fatal: it is printed with
//! [`crate::error!`] and the process exits with status 1.
//!
//! ## Usage Patterns
//!
//! ```bash
//! lyricorp run --artist "Bob Dylan"
//! lyricorp run --artist "The Beatles" --band-members "John Lennon, Paul McCartney, Lennon-McCartney"
//! lyricorp lyrics --artist "Bob Dylan" --output-dir ./dylan
//! lyricorp corpus --artist "Bob Dylan" --output-dir ./dylan
//! ```

mod albums;
mod corpus;
mod lyrics;
mod run;
mod session;
mod tracks;

use std::{collections::BTreeSet, path::PathBuf};

pub use albums::albums;
pub use corpus::corpus;
pub use lyrics::lyrics;
pub use run::run;
pub use tracks::tracks;

/// Artist and connection options shared by the networked commands.
#[derive(Debug, Clone, Default)]
pub struct ArtistOptions {
    pub artist: String,
    pub artist_id: Option<u64>,
    pub band_members: Option<BTreeSet<String>>,
    pub token: Option<String>,
    pub output_dir: Option<PathBuf>,
}

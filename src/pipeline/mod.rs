//! # Pipeline Module
//!
//! The four collection stages, in the order they run:
//!
//! ```text
//! albums  ->  tracks  ->  lyrics  ->  corpus
//! ```
//!
//! - [`albums`] - Pages through the artist's albums and dedups them.
//! - [`tracks`] - Expands every album into tracks and merges in the flat song listing.
//! - [`lyrics`] - Looks up lyrics per track, validates the match and routes it by
//!   songwriter attribution.
//! - [`corpus`] - Folds the distinct lyric blocks into a single text.
//!
//! Each stage takes the previous stage's table as input and returns plain data;
//! writing the tables is left to [`crate::tables`], so a stage's output is flushed
//! before the next stage starts.
//!
//! All stages receive the same immutable [`Session`] instead of reading globals.

pub mod albums;
pub mod corpus;
pub mod lyrics;
pub mod tracks;

use std::collections::BTreeSet;

use crate::config::Settings;

/// Who the corpus is about.
///
/// `aliases` holds alternate songwriting credits (band members, pseudonyms,
/// writing partnerships). Solo artists have none; the same predicate serves both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistIdentity {
    pub name: String,
    pub id: u64,
    pub aliases: BTreeSet<String>,
}

impl ArtistIdentity {
    pub fn new(name: &str, id: u64) -> Self {
        Self {
            name: name.trim().to_string(),
            id,
            aliases: BTreeSet::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: BTreeSet<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn is_band(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// True when any credited writer is the artist or one of the aliases.
    pub fn wrote(&self, writers: &BTreeSet<String>) -> bool {
        writers
            .iter()
            .any(|w| *w == self.name || self.aliases.contains(w))
    }
}

/// Everything a stage needs to know about the current run.
#[derive(Debug, Clone)]
pub struct Session {
    pub artist: ArtistIdentity,
    pub settings: Settings,
}

impl Session {
    pub fn new(artist: ArtistIdentity, settings: Settings) -> Self {
        Self { artist, settings }
    }
}

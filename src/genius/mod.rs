//! # Genius Integration Module
//!
//! This module is the integration layer between the corpus pipeline and the Genius
//! lyrics/metadata service. It wraps every HTTP call the pipeline needs behind the
//! [`LyricsProvider`] trait so the collection stages never talk to reqwest directly.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline Stages (albums, tracks, lyrics)
//!          ↓
//! LyricsProvider trait
//!          ↓
//! GeniusClient
//!     ├── Artists (lookup, albums, flat song listing)
//!     ├── Songs (album tracks, search, song details)
//!     └── Lyrics (song page scraping)
//!          ↓
//! HTTP Layer (reqwest, JSON, HTML)
//! ```
//!
//! ## Endpoints
//!
//! ### Authenticated API (`GENIUS_API_URL`)
//! - `GET /search?q=` - Artist lookup and song search
//! - `GET /songs/{id}` - Canonical title, primary artist and songwriter credits
//! - `GET /artists/{id}/songs` - The artist's flat song listing
//!
//! ### Public API (`GENIUS_PUBLIC_API_URL`)
//! - `GET /artists/{id}/albums` - Albums by artist
//! - `GET /albums/{id}/tracks` - Tracks in an album
//!
//! ### Song pages
//! The API does not serve lyrics, so they are read from the song's web page.
//!
//! ## Pagination
//!
//! Listings are requested page by page. Each page carries a `next_page` pointer
//! that is `null` on the last page; callers keep asking until they see it.
//!
//! ## Error Handling
//!
//! - **Timeouts** surface as [`ProviderError::Timeout`] so callers can skip the
//!   current row or page and keep going.
//! - **502 Bad Gateway** is retried after 10 seconds.
//! - **429 Too Many Requests** waits for `Retry-After` when it is at most two minutes.
//!   Without the header the request fails right away.
//! - Both retries share a small per-request budget ([`client::MAX_RETRIES`]).
//! - Everything else (bad token, malformed payloads) is returned as an error and
//!   ends the run.
//!
//! ## Pacing
//!
//! The client waits a fixed courtesy delay before each request and uses a generous
//! per-request timeout. Both come from [`crate::config::Settings`].

pub mod artists;
pub mod client;
pub mod lyrics;
pub mod songs;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{AlbumEntry, AlbumTrackEntry, ArtistSummary, Page, SongMatch, SongSummary};

pub use client::GeniusClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("http error: {0}")]
    Http(reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("cannot read lyrics page: {0}")]
    Scrape(String),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Http(err)
        }
    }
}

/// The operations the pipeline needs from a lyrics/metadata service.
///
/// Listing calls take a 1-based page number and return one [`Page`]. Lookups
/// return `Ok(None)` when the service has nothing for the query; that is a normal
/// outcome and not an error.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Resolves an artist display name to the service's artist record.
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistSummary>, ProviderError>;

    async fn artist_albums(
        &self,
        artist_id: u64,
        page: u32,
    ) -> Result<Page<AlbumEntry>, ProviderError>;

    async fn album_tracks(
        &self,
        album_id: u64,
        page: u32,
    ) -> Result<Page<AlbumTrackEntry>, ProviderError>;

    async fn artist_songs(
        &self,
        artist_id: u64,
        page: u32,
    ) -> Result<Page<SongSummary>, ProviderError>;

    /// Searches a song by title and artist and returns the service's best match,
    /// which is not necessarily the song that was asked for.
    async fn search_song(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<SongMatch>, ProviderError>;
}

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "year")]
    pub year: String,
    #[serde(rename = "album title")]
    pub title: String,
    #[serde(rename = "album id")]
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "album title")]
    pub album_title: String,
    #[serde(rename = "song title")]
    pub song_title: String,
    #[serde(rename = "song id")]
    pub song_id: u64,
    #[serde(rename = "year")]
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricRow {
    #[serde(rename = "song title")]
    pub song_title: String,
    #[serde(rename = "lyrics")]
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRow {
    #[serde(rename = "year")]
    pub year: String,
    #[serde(rename = "lyrics")]
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRow {
    #[serde(rename = "song title")]
    pub song_title: String,
    #[serde(rename = "year")]
    pub year: String,
    #[serde(rename = "album title")]
    pub album_title: String,
    #[serde(rename = "writers")]
    pub writers: String,
}

/// Songwriter credits of an accepted match. `Unknown` is exported as "N/A".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Writers {
    Unknown,
    Credited(BTreeSet<String>),
}

impl fmt::Display for Writers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Writers::Unknown => write!(f, "{}", NOT_AVAILABLE),
            Writers::Credited(names) => {
                let joined = names.iter().cloned().collect::<Vec<_>>().join("; ");
                write!(f, "{}", joined)
            }
        }
    }
}

/// One appearance of a song the artist did not (provably) write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionEntry {
    pub year: String,
    pub album_title: String,
    pub writers: Writers,
}

/// What the provider returned for a title+artist search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMatch {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub writers: BTreeSet<String>,
}

/// One page of a paginated provider listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
}

#[derive(Tabled)]
pub struct ExportTableRow {
    pub table: String,
    pub file: String,
    pub rows: usize,
}

// Genius wire types. Every response is wrapped in {"response": ...}.

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDateComponents {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumEntry {
    pub id: u64,
    pub name: String,
    pub release_date_components: Option<ReleaseDateComponents>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumsPage {
    #[serde(default)]
    pub albums: Vec<AlbumEntry>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongSummary {
    pub id: u64,
    pub title: String,
    pub primary_artist: Option<ArtistSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTrackEntry {
    pub song: Option<SongSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTracksPage {
    #[serde(default)]
    pub tracks: Vec<AlbumTrackEntry>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSongsPage {
    #[serde(default)]
    pub songs: Vec<SongSummary>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: String,
    pub result: SongSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongDetail {
    pub title: String,
    pub primary_artist: ArtistSummary,
    pub url: String,
    #[serde(default)]
    pub writer_artists: Vec<ArtistSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongResponse {
    pub song: SongDetail,
}

#![allow(dead_code)]

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use lyricorp::{
    config::Settings,
    genius::{LyricsProvider, ProviderError},
    pipeline::{ArtistIdentity, Session},
    types::{
        AlbumEntry, AlbumTrackEntry, ArtistSummary, Page, ReleaseDateComponents, SongMatch,
        SongSummary,
    },
};

/// In-memory stand-in for the Genius API. Listings are stored page by page.
#[derive(Default)]
pub struct FakeProvider {
    pub artist: Option<ArtistSummary>,
    pub albums: Vec<Vec<AlbumEntry>>,
    pub album_tracks: HashMap<u64, Vec<Vec<AlbumTrackEntry>>>,
    pub songs: Vec<Vec<SongSummary>>,
    pub matches: HashMap<String, SongMatch>,
    pub timeouts: HashSet<String>,
    pub failures: HashSet<String>,
    pub album_timeouts: HashSet<u64>,
    pub searches: Mutex<Vec<String>>,
}

fn page_of<T: Clone>(pages: &[Vec<T>], page: u32) -> Page<T> {
    let index = page.saturating_sub(1) as usize;
    Page {
        items: pages.get(index).cloned().unwrap_or_default(),
        next_page: if index + 1 < pages.len() {
            Some(page + 1)
        } else {
            None
        },
    }
}

#[async_trait]
impl LyricsProvider for FakeProvider {
    async fn find_artist(&self, _name: &str) -> Result<Option<ArtistSummary>, ProviderError> {
        Ok(self.artist.clone())
    }

    async fn artist_albums(
        &self,
        _artist_id: u64,
        page: u32,
    ) -> Result<Page<AlbumEntry>, ProviderError> {
        Ok(page_of(&self.albums, page))
    }

    async fn album_tracks(
        &self,
        album_id: u64,
        page: u32,
    ) -> Result<Page<AlbumTrackEntry>, ProviderError> {
        if self.album_timeouts.contains(&album_id) {
            return Err(ProviderError::Timeout(format!("album {}", album_id)));
        }
        let pages = self.album_tracks.get(&album_id).cloned().unwrap_or_default();
        Ok(page_of(&pages, page))
    }

    async fn artist_songs(
        &self,
        _artist_id: u64,
        page: u32,
    ) -> Result<Page<SongSummary>, ProviderError> {
        Ok(page_of(&self.songs, page))
    }

    async fn search_song(
        &self,
        title: &str,
        _artist: &str,
    ) -> Result<Option<SongMatch>, ProviderError> {
        self.searches.lock().unwrap().push(title.to_string());
        if self.timeouts.contains(title) {
            return Err(ProviderError::Timeout(title.to_string()));
        }
        if self.failures.contains(title) {
            return Err(ProviderError::Status {
                status: 401,
                url: "https://api.genius.com/search".to_string(),
            });
        }
        Ok(self.matches.get(title).cloned())
    }
}

pub fn settings() -> Settings {
    Settings {
        request_delay: Duration::ZERO,
        pause: Duration::ZERO,
        ..Settings::default()
    }
}

pub fn session(name: &str) -> Session {
    Session::new(ArtistIdentity::new(name, 181), settings())
}

pub fn band_session(name: &str, members: &[&str]) -> Session {
    let aliases: BTreeSet<String> = members.iter().map(|m| m.to_string()).collect();
    Session::new(
        ArtistIdentity::new(name, 1).with_aliases(aliases),
        settings(),
    )
}

pub fn album_entry(id: u64, name: &str, year: Option<i32>) -> AlbumEntry {
    AlbumEntry {
        id,
        name: name.to_string(),
        release_date_components: year.map(|y| ReleaseDateComponents { year: Some(y) }),
    }
}

pub fn song(id: u64, title: &str, primary_artist: &str) -> SongSummary {
    SongSummary {
        id,
        title: title.to_string(),
        primary_artist: Some(ArtistSummary {
            id: 1,
            name: primary_artist.to_string(),
        }),
    }
}

pub fn track_entry(song: Option<SongSummary>) -> AlbumTrackEntry {
    AlbumTrackEntry { song }
}

pub fn song_match(title: &str, artist: &str, lyrics: &str, writers: &[&str]) -> SongMatch {
    SongMatch {
        title: title.to_string(),
        artist: artist.to_string(),
        lyrics: lyrics.to_string(),
        writers: writers.iter().map(|w| w.to_string()).collect(),
    }
}

pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lyricorp-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

use std::collections::{BTreeMap, BTreeSet};

use tokio::time::sleep;

use crate::{
    Res,
    config::MatchThresholds,
    genius::LyricsProvider,
    info,
    pipeline::{ArtistIdentity, Session},
    types::{AttributionEntry, SongMatch, Track, Writers},
    utils, warning,
};

/// Outcome of comparing a search result with the query that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Accepted,
    TitleMismatch(f64),
    ArtistMismatch(f64),
}

/// Checks that the provider returned the song that was asked for.
///
/// The title ratio is rounded to two decimals before it is compared, the artist
/// ratio is compared as is (with the default threshold of 1.0 the names must be
/// identical).
pub fn validate_match(
    thresholds: &MatchThresholds,
    query_title: &str,
    query_artist: &str,
    found: &SongMatch,
) -> Verdict {
    let title_ratio = utils::round_to_hundredths(utils::similarity_ratio(&found.title, query_title));
    if title_ratio < thresholds.title {
        return Verdict::TitleMismatch(title_ratio);
    }

    let artist_ratio = utils::similarity_ratio(&found.artist, query_artist);
    if artist_ratio < thresholds.artist {
        return Verdict::ArtistMismatch(artist_ratio);
    }

    Verdict::Accepted
}

/// Who wrote an accepted match, relative to the artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    ByArtist,
    NotByArtist(BTreeSet<String>),
    Unknown,
}

pub fn attribute(artist: &ArtistIdentity, writers: &BTreeSet<String>) -> Attribution {
    if writers.is_empty() {
        Attribution::Unknown
    } else if artist.wrote(writers) {
        Attribution::ByArtist
    } else {
        Attribution::NotByArtist(writers.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub rows: usize,
    pub matched: usize,
    pub missing: usize,
    pub rejected: usize,
    pub timed_out: usize,
    pub by_artist: usize,
    pub not_by_artist: usize,
    pub unknown_writer: usize,
}

/// Everything the resolver produced.
///
/// - `by_title`: song title to the distinct normalized lyric texts found for it
/// - `by_year`: row year to the distinct lyric texts released that year
/// - `not_by_artist`: song title to every appearance whose writers do not
///   include the artist (or are unknown)
#[derive(Debug, Clone, Default)]
pub struct LyricsReport {
    pub by_title: BTreeMap<String, BTreeSet<String>>,
    pub by_year: BTreeMap<String, BTreeSet<String>>,
    pub not_by_artist: BTreeMap<String, Vec<AttributionEntry>>,
    pub stats: ResolveStats,
}

impl LyricsReport {
    /// Routes one accepted match. Every match lands in exactly one output.
    pub fn record(&mut self, artist: &ArtistIdentity, track: &Track, found: &SongMatch) -> Attribution {
        let attribution = attribute(artist, &found.writers);
        match &attribution {
            Attribution::ByArtist => {
                let lyrics = utils::normalize_lyrics(&found.lyrics);
                self.by_title
                    .entry(track.song_title.clone())
                    .or_default()
                    .insert(lyrics.clone());
                self.by_year.entry(track.year.clone()).or_default().insert(lyrics);
                self.stats.by_artist += 1;
            }
            Attribution::NotByArtist(writers) => {
                self.push_attribution(track, Writers::Credited(writers.clone()));
                self.stats.not_by_artist += 1;
            }
            Attribution::Unknown => {
                self.push_attribution(track, Writers::Unknown);
                self.stats.unknown_writer += 1;
            }
        }
        attribution
    }

    fn push_attribution(&mut self, track: &Track, writers: Writers) {
        self.not_by_artist
            .entry(track.song_title.clone())
            .or_default()
            .push(AttributionEntry {
                year: track.year.clone(),
                album_title: track.album_title.clone(),
                writers,
            });
    }
}

/// Looks up lyrics for every track row and sorts them by songwriter attribution.
///
/// # Process
///
/// For each row, in table order:
/// 1. Search title + artist. No result: skip.
/// 2. Validate the result with [`validate_match`]. Rejected: skip.
/// 3. Route the match with [`LyricsReport::record`]:
///    - no credited writers: recorded as "N/A" in the not-by-artist table
///    - the artist (or an alias) among the writers: normalized lyrics go to the
///      by-title and by-year tables
///    - otherwise: recorded with its writers in the not-by-artist table
///
/// # Pacing
///
/// After every `pause_every` matched rows the resolver sleeps for `pause`.
///
/// # Error Handling
///
/// A timed out lookup skips the row. Any other provider error aborts the stage.
pub async fn resolve_lyrics<P: LyricsProvider + ?Sized>(
    provider: &P,
    session: &Session,
    tracks: &[Track],
) -> Res<LyricsReport> {
    let settings = &session.settings;
    let artist = &session.artist;
    let mut report = LyricsReport::default();
    let rows_total = tracks.len();

    let pb = utils::spinner("Fetching lyrics...");

    for (rows_count, row) in tracks.iter().enumerate() {
        let track = Track {
            album_title: row.album_title.trim().to_string(),
            song_title: row.song_title.trim().to_string(),
            song_id: row.song_id,
            year: row.year.trim().to_string(),
        };
        report.stats.rows += 1;
        pb.set_message(format!(
            "Fetching lyrics for \"{title}\" ({rows_count}/{rows_total})",
            title = track.song_title,
            rows_count = rows_count + 1,
            rows_total = rows_total
        ));

        let found = match provider.search_song(&track.song_title, &artist.name).await {
            Ok(Some(found)) => found,
            Ok(None) => {
                report.stats.missing += 1;
                pb.suspend(|| {
                    warning!(
                        "Lyrics for \"{}\" are not available, skipped.",
                        track.song_title
                    )
                });
                continue;
            }
            Err(e) if e.is_timeout() => {
                report.stats.timed_out += 1;
                pb.suspend(|| warning!("Timed out looking up \"{}\", skipped.", track.song_title));
                continue;
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        report.stats.matched += 1;

        match validate_match(&settings.thresholds, &track.song_title, &artist.name, &found) {
            Verdict::Accepted => match report.record(artist, &track, &found) {
                Attribution::ByArtist => {}
                Attribution::NotByArtist(writers) => pb.suspend(|| {
                    info!(
                        "\"{}\" skipped since {} is not the original writer. Original author(s): {}",
                        found.title,
                        artist.name,
                        writers.iter().cloned().collect::<Vec<_>>().join(", ")
                    )
                }),
                Attribution::Unknown => pb.suspend(|| {
                    info!(
                        "\"{}\" skipped since its songwriter is not known, recorded as N/A.",
                        track.song_title
                    )
                }),
            },
            Verdict::TitleMismatch(ratio) => {
                report.stats.rejected += 1;
                pb.suspend(|| {
                    warning!(
                        "Search for \"{}\" returned \"{}\" (title similarity {:.2}), skipped.",
                        track.song_title,
                        found.title,
                        ratio
                    )
                });
            }
            Verdict::ArtistMismatch(ratio) => {
                report.stats.rejected += 1;
                pb.suspend(|| {
                    warning!(
                        "Search for \"{}\" returned a song by \"{}\" (artist similarity {:.2}), skipped.",
                        track.song_title,
                        found.artist,
                        ratio
                    )
                });
            }
        }

        if report.stats.matched % settings.pause_every.max(1) == 0 && !settings.pause.is_zero() {
            sleep(settings.pause).await;
        }
    }

    pb.finish_and_clear();
    Ok(report)
}

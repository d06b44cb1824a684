//! CSV tables exchanged between the pipeline stages.
//!
//! Every stage writes its result as a table in the output directory and the next
//! stage reads it back, so a run interrupted in one stage keeps everything the
//! earlier stages produced. File names start with the last word of the artist's
//! name, e.g. `Dylan_albums.csv` for Bob Dylan.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Res,
    pipeline::lyrics::LyricsReport,
    types::{Album, AttributionRow, LyricRow, Track, YearRow},
    utils,
};

pub const ALBUM_HEADERS: [&str; 3] = ["year", "album title", "album id"];
pub const TRACK_HEADERS: [&str; 4] = ["album title", "song title", "song id", "year"];
pub const LYRIC_HEADERS: [&str; 2] = ["song title", "lyrics"];
pub const YEAR_HEADERS: [&str; 2] = ["year", "lyrics"];
pub const ATTRIBUTION_HEADERS: [&str; 4] = ["song title", "year", "album title", "writers"];

/// Locations of all tables produced for one artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub stem: String,
    pub albums: PathBuf,
    pub tracks: PathBuf,
    pub lyrics: PathBuf,
    pub lyrics_by_years: PathBuf,
    pub not_by_artist: PathBuf,
    pub corpus: PathBuf,
}

impl TablePaths {
    pub fn new(dir: &Path, artist_name: &str) -> Self {
        let stem = utils::file_stem(artist_name);
        Self {
            albums: dir.join(format!("{}_albums.csv", stem)),
            tracks: dir.join(format!("{}_tracks.csv", stem)),
            lyrics: dir.join(format!("{}_lyrics.csv", stem)),
            lyrics_by_years: dir.join(format!("{}_lyrics_by_years.csv", stem)),
            not_by_artist: dir.join(format!("songs_not_by_{}.csv", stem)),
            corpus: dir.join(format!("{}_corpus.csv", stem)),
            stem,
        }
    }
}

async fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Res<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.to_string())?;

    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }
    async_fs::write(path, bytes).await?;
    Ok(())
}

async fn read_rows<T: DeserializeOwned>(path: &Path) -> Res<Vec<T>> {
    let bytes = async_fs::read(path)
        .await
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let mut rdr = csv::Reader::from_reader(bytes.as_slice());
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub async fn write_albums(path: &Path, albums: &[Album]) -> Res<()> {
    write_rows(path, &ALBUM_HEADERS, albums).await
}

pub async fn read_albums(path: &Path) -> Res<Vec<Album>> {
    read_rows(path).await
}

pub async fn write_tracks(path: &Path, tracks: &[Track]) -> Res<()> {
    write_rows(path, &TRACK_HEADERS, tracks).await
}

pub async fn read_tracks(path: &Path) -> Res<Vec<Track>> {
    read_rows(path).await
}

pub async fn write_lyrics(path: &Path, rows: &[LyricRow]) -> Res<()> {
    write_rows(path, &LYRIC_HEADERS, rows).await
}

pub async fn read_lyrics(path: &Path) -> Res<Vec<LyricRow>> {
    read_rows(path).await
}

pub async fn write_lyrics_by_years(path: &Path, rows: &[YearRow]) -> Res<()> {
    write_rows(path, &YEAR_HEADERS, rows).await
}

pub async fn write_not_by_artist(path: &Path, rows: &[AttributionRow]) -> Res<()> {
    write_rows(path, &ATTRIBUTION_HEADERS, rows).await
}

/// Writes the corpus as a one-column, one-row table headed `<stem> corpus`.
pub async fn write_corpus(path: &Path, stem: &str, corpus: &str) -> Res<()> {
    let header = format!("{} corpus", stem);
    write_rows(path, &[header.as_str()], &[[corpus]]).await
}

pub async fn read_corpus(path: &Path) -> Res<String> {
    let rows: Vec<(String,)> = read_rows(path).await?;
    Ok(rows.into_iter().next().map(|(c,)| c).unwrap_or_default())
}

/// One row per distinct (song title, lyrics) pair.
pub fn lyric_rows(report: &LyricsReport) -> Vec<LyricRow> {
    report
        .by_title
        .iter()
        .flat_map(|(title, texts)| {
            texts.iter().map(move |lyrics| LyricRow {
                song_title: title.clone(),
                lyrics: lyrics.clone(),
            })
        })
        .collect()
}

/// One row per year; the year's distinct lyrics are joined by a space.
pub fn year_rows(report: &LyricsReport) -> Vec<YearRow> {
    report
        .by_year
        .iter()
        .map(|(year, texts)| YearRow {
            year: year.clone(),
            lyrics: texts.iter().cloned().collect::<Vec<_>>().join(" "),
        })
        .collect()
}

pub fn attribution_rows(report: &LyricsReport) -> Vec<AttributionRow> {
    report
        .not_by_artist
        .iter()
        .flat_map(|(title, entries)| {
            entries.iter().map(move |entry| AttributionRow {
                song_title: title.clone(),
                year: entry.year.clone(),
                album_title: entry.album_title.clone(),
                writers: entry.writers.to_string(),
            })
        })
        .collect()
}

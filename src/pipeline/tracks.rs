use std::collections::HashSet;

use crate::{
    Res,
    genius::LyricsProvider,
    info,
    pipeline::Session,
    types::{Album, NOT_AVAILABLE, Track},
    utils, warning,
};

/// Builds the artist's track table from the album table and the flat song listing.
///
/// # Process
///
/// 1. **Album view**: every album is paged through; each track with a song
///    payload becomes `(album title, song title, song id, album year)`.
/// 2. **Flat view**: the artist's song listing is paged through; songs whose
///    primary artist is exactly the session's artist become
///    `("N/A", song title, song id, "N/A")`.
/// 3. **Merge**: both sets are unioned and sorted by song title.
///
/// A song on two albums yields two rows, and a song seen in both views keeps its
/// album rows plus one "N/A" row. The flat view is the only source for singles,
/// demos and other songs that are not on any album.
///
/// # Error Handling
///
/// A timeout while paging one album skips the rest of that album. Timeouts in the
/// flat listing and every other provider error abort the stage.
pub async fn collect_tracks<P: LyricsProvider + ?Sized>(
    provider: &P,
    session: &Session,
    albums: &[Album],
) -> Res<Vec<Track>> {
    let album_tracks = collect_album_tracks(provider, albums).await?;
    info!(
        "Tracks by album collected ({} tracks). Moving on to singles, demos and other uncategorized songs.",
        album_tracks.len()
    );

    let flat_tracks = collect_flat_tracks(provider, session).await?;
    info!("Uncategorized songs collected ({} songs).", flat_tracks.len());

    Ok(merge_tracks(album_tracks, flat_tracks))
}

async fn collect_album_tracks<P: LyricsProvider + ?Sized>(
    provider: &P,
    albums: &[Album],
) -> Res<HashSet<Track>> {
    let pb = utils::spinner("Fetching album tracks...");
    let albums_total = albums.len();
    let mut tracks: HashSet<Track> = HashSet::new();

    for (albums_count, album) in albums.iter().enumerate() {
        pb.set_message(format!(
            "Fetching tracks of {title} ({albums_count}/{albums_total})",
            title = album.title,
            albums_count = albums_count + 1,
            albums_total = albums_total
        ));

        let mut page = 1;
        loop {
            let res = match provider.album_tracks(album.id, page).await {
                Ok(res) => res,
                Err(e) if e.is_timeout() => {
                    pb.suspend(|| {
                        warning!(
                            "Timed out fetching tracks of album \"{}\" (page {}), skipped.",
                            album.title,
                            page
                        )
                    });
                    break;
                }
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e.into());
                }
            };

            for entry in res.items {
                if let Some(song) = entry.song {
                    tracks.insert(Track {
                        album_title: album.title.clone(),
                        song_title: utils::clean_song_title(&song.title),
                        song_id: song.id,
                        year: album.year.clone(),
                    });
                }
            }

            match res.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }
    }

    pb.finish_and_clear();
    Ok(tracks)
}

async fn collect_flat_tracks<P: LyricsProvider + ?Sized>(
    provider: &P,
    session: &Session,
) -> Res<HashSet<Track>> {
    let pb = utils::spinner("Fetching uncategorized songs...");
    let mut tracks: HashSet<Track> = HashSet::new();
    let mut page = 1;

    loop {
        let res = match provider.artist_songs(session.artist.id, page).await {
            Ok(res) => res,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        for song in res.items {
            let is_primary = song
                .primary_artist
                .as_ref()
                .is_some_and(|a| a.name == session.artist.name);
            if is_primary {
                tracks.insert(Track {
                    album_title: NOT_AVAILABLE.to_string(),
                    song_title: utils::clean_song_title(&song.title),
                    song_id: song.id,
                    year: NOT_AVAILABLE.to_string(),
                });
            }
        }
        pb.set_message(format!("Fetched {} uncategorized songs...", tracks.len()));

        match res.next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }

    pb.finish_and_clear();
    Ok(tracks)
}

/// Unions both views and sorts by song title. Ties keep full-tuple order so the
/// output is stable across runs.
pub fn merge_tracks(album_tracks: HashSet<Track>, flat_tracks: HashSet<Track>) -> Vec<Track> {
    let mut merged = flat_tracks;
    merged.extend(album_tracks);

    let mut tracks: Vec<Track> = merged.into_iter().collect();
    tracks.sort();
    utils::sort_tracks_by_title(&mut tracks);
    tracks
}

use std::collections::HashSet;

use crate::{
    Res,
    genius::LyricsProvider,
    pipeline::Session,
    types::{Album, AlbumEntry, NOT_AVAILABLE},
    utils,
};

/// Collects every album of the session's artist, deduplicated and sorted by year.
///
/// Pages through the provider's album listing until `next_page` is empty. Two
/// entries collapse only when year, title and id are all equal. Any provider
/// error, timeouts included, aborts the stage.
pub async fn collect_albums<P: LyricsProvider + ?Sized>(
    provider: &P,
    session: &Session,
) -> Res<Vec<Album>> {
    let pb = utils::spinner("Fetching albums...");
    let mut seen: HashSet<Album> = HashSet::new();
    let mut page = 1;

    loop {
        let res = match provider.artist_albums(session.artist.id, page).await {
            Ok(res) => res,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        seen.extend(res.items.iter().map(album_from_entry));
        pb.set_message(format!("Fetched {} albums...", seen.len()));

        match res.next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }

    pb.finish_and_clear();

    let mut albums: Vec<Album> = seen.into_iter().collect();
    albums.sort();
    utils::sort_albums_by_year(&mut albums);
    Ok(albums)
}

pub fn album_from_entry(entry: &AlbumEntry) -> Album {
    let year = entry
        .release_date_components
        .as_ref()
        .and_then(|c| c.year)
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Album {
        year,
        title: utils::to_ascii(&entry.name),
        id: entry.id,
    }
}

use std::collections::BTreeSet;

use crate::{
    genius::{GeniusClient, ProviderError, lyrics},
    types::{
        AlbumTrackEntry, AlbumTracksPage, Page, SearchHit, SearchResponse, SongDetail, SongMatch,
        SongResponse,
    },
    utils,
};

/// Retrieves one page of an album's track listing from the public API.
///
/// Entries whose `song` is `null` (interludes, unlisted bonus material) are
/// passed through; the track collector skips them.
pub async fn get_album_tracks(
    client: &GeniusClient,
    album_id: u64,
    page: u32,
) -> Result<Page<AlbumTrackEntry>, ProviderError> {
    let url = format!(
        "{uri}/albums/{id}/tracks",
        uri = client.public_api_url,
        id = album_id
    );
    let query = [
        ("per_page", client.per_page.to_string()),
        ("page", page.to_string()),
    ];
    let res: AlbumTracksPage = client.get_json(&url, &query, false).await?;

    Ok(Page {
        items: res.tracks,
        next_page: res.next_page,
    })
}

/// Searches a song by title and artist and resolves the chosen hit to a full match.
///
/// # Process
///
/// 1. Searches `"{title} {artist}"`.
/// 2. Picks a hit with [`pick_hit`]; no song hits means no match.
/// 3. Loads the song details for the canonical title, primary artist and
///    songwriter credits.
/// 4. Reads the lyrics from the song page. A page without lyrics means no match.
///
/// The returned match may be a different song than the one requested; the
/// caller is expected to validate it.
pub async fn search_song(
    client: &GeniusClient,
    title: &str,
    artist: &str,
) -> Result<Option<SongMatch>, ProviderError> {
    let url = format!("{uri}/search", uri = client.api_url);
    let res: SearchResponse = client
        .get_json(&url, &[("q", format!("{} {}", title, artist))], true)
        .await?;

    let hit = match pick_hit(&res.hits, title) {
        Some(hit) => hit,
        None => return Ok(None),
    };

    let song = get_song(client, hit.result.id).await?;
    let page = client.get_page(&song.url).await?;
    let text = lyrics::extract_lyrics(&page)?;
    if text.is_empty() {
        return Ok(None);
    }

    let writers: BTreeSet<String> = song
        .writer_artists
        .iter()
        .map(|w| w.name.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    Ok(Some(SongMatch {
        title: song.title,
        artist: song.primary_artist.name,
        lyrics: text,
        writers,
    }))
}

/// Chooses the search hit the way the service's own clients do: the first song
/// whose simplified title equals the query, else the first song at all.
pub fn pick_hit<'a>(hits: &'a [SearchHit], title: &str) -> Option<&'a SearchHit> {
    let wanted = utils::simplify_title(title);
    let songs: Vec<&SearchHit> = hits.iter().filter(|h| h.kind == "song").collect();

    songs
        .iter()
        .find(|h| utils::simplify_title(&h.result.title) == wanted)
        .or_else(|| songs.first())
        .copied()
}

async fn get_song(client: &GeniusClient, song_id: u64) -> Result<SongDetail, ProviderError> {
    let url = format!("{uri}/songs/{id}", uri = client.api_url, id = song_id);
    let res: SongResponse = client
        .get_json(&url, &[("text_format", "plain".to_string())], true)
        .await?;
    Ok(res.song)
}

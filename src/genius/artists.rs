use crate::{
    genius::{GeniusClient, ProviderError},
    types::{AlbumEntry, AlbumsPage, ArtistSongsPage, ArtistSummary, Page, SearchResponse, SongSummary},
};

/// Looks up an artist by display name through the search endpoint.
///
/// Prefers the primary artist of a hit whose name equals `name` ignoring case,
/// otherwise takes the primary artist of the first hit. Returns `Ok(None)` when the
/// search has no hits at all.
///
/// # Example
///
/// ```
/// let artist = find_artist(&client, "Bob Dylan").await?;
/// assert_eq!(artist.map(|a| a.id), Some(181));
/// ```
pub async fn find_artist(
    client: &GeniusClient,
    name: &str,
) -> Result<Option<ArtistSummary>, ProviderError> {
    let url = format!("{uri}/search", uri = client.api_url);
    let res: SearchResponse = client
        .get_json(&url, &[("q", name.to_string())], true)
        .await?;

    let candidates: Vec<ArtistSummary> = res
        .hits
        .into_iter()
        .filter_map(|hit| hit.result.primary_artist)
        .collect();

    let wanted = name.trim().to_lowercase();
    let exact = candidates
        .iter()
        .find(|artist| artist.name.trim().to_lowercase() == wanted)
        .cloned();

    Ok(exact.or_else(|| candidates.into_iter().next()))
}

/// Retrieves one page of an artist's albums from the public API.
///
/// The page size comes from the client settings (at most 50).
pub async fn get_artist_albums(
    client: &GeniusClient,
    artist_id: u64,
    page: u32,
) -> Result<Page<AlbumEntry>, ProviderError> {
    let url = format!(
        "{uri}/artists/{id}/albums",
        uri = client.public_api_url,
        id = artist_id
    );
    let query = [
        ("per_page", client.per_page.to_string()),
        ("page", page.to_string()),
    ];
    let res: AlbumsPage = client.get_json(&url, &query, false).await?;

    Ok(Page {
        items: res.albums,
        next_page: res.next_page,
    })
}

/// Retrieves one page of the artist's flat song listing.
///
/// Unlike album track listings this includes singles, demos and other songs that
/// are not attached to any album, but it also contains songs where the artist is
/// only featured; callers filter on the primary artist.
pub async fn get_artist_songs(
    client: &GeniusClient,
    artist_id: u64,
    page: u32,
) -> Result<Page<SongSummary>, ProviderError> {
    let url = format!(
        "{uri}/artists/{id}/songs",
        uri = client.api_url,
        id = artist_id
    );
    let query = [
        ("per_page", client.per_page.to_string()),
        ("page", page.to_string()),
        ("sort", "title".to_string()),
    ];
    let res: ArtistSongsPage = client.get_json(&url, &query, true).await?;

    Ok(Page {
        items: res.songs,
        next_page: res.next_page,
    })
}

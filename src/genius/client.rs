use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config::Settings,
    genius::{LyricsProvider, ProviderError, artists, songs},
    types::{AlbumEntry, AlbumTrackEntry, ArtistSummary, Envelope, Page, SongMatch, SongSummary},
    warning,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const BAD_GATEWAY_BACKOFF: Duration = Duration::from_secs(10);

/// Retries allowed for one request, counting 502 and 429 answers together.
pub const MAX_RETRIES: u32 = 3;

/// HTTP client for the Genius API.
///
/// Holds one reqwest connection pool, the access token and the pacing settings.
/// Every request waits `request_delay` first so a long run does not trip the
/// service's rate limiter.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    http: Client,
    token: String,
    pub(crate) api_url: String,
    pub(crate) public_api_url: String,
    pub(crate) per_page: u32,
    request_delay: Duration,
}

impl GeniusClient {
    /// Creates a client for the given access token.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying reqwest client cannot be built (for example
    /// when no TLS backend is available).
    pub fn new(token: &str, settings: &Settings) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            http,
            token: token.trim().to_string(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            public_api_url: settings.public_api_url.trim_end_matches('/').to_string(),
            per_page: settings.per_page,
            request_delay: settings.request_delay,
        })
    }

    /// Performs a GET request and unwraps the `{"response": ...}` envelope.
    ///
    /// # Retry Logic
    ///
    /// - 502 Bad Gateway is retried after 10 seconds.
    /// - 429 Too Many Requests is retried after `Retry-After` seconds when the
    ///   header is present and at most 120; a missing header or a longer wait is
    ///   returned as an error.
    /// - At most [`MAX_RETRIES`] retries per request, after which the last status
    ///   is returned as [`ProviderError::Status`].
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        authenticated: bool,
    ) -> Result<T, ProviderError> {
        let mut retries = 0;
        loop {
            sleep(self.request_delay).await;

            let mut request = self.http.get(url).query(query);
            if authenticated {
                request = request.bearer_auth(&self.token);
            }
            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::BAD_GATEWAY && retries < MAX_RETRIES {
                retries += 1;
                sleep(BAD_GATEWAY_BACKOFF).await;
                continue; // retry
            }

            // check for retry-after header
            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok());
                match retry_after {
                    Some(secs) if secs <= 120 && retries < MAX_RETRIES => {
                        retries += 1;
                        sleep(Duration::from_secs(secs)).await;
                        continue; // retry
                    }
                    Some(secs) if secs > 120 => warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        secs
                    ),
                    _ => {}
                }
            }

            if !status.is_success() {
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let envelope = response.json::<Envelope<T>>().await?;
            return Ok(envelope.response);
        }
    }

    /// Fetches a web page as text. Used for song pages, which carry the lyrics.
    pub(crate) async fn get_page(&self, url: &str) -> Result<String, ProviderError> {
        sleep(self.request_delay).await;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl LyricsProvider for GeniusClient {
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistSummary>, ProviderError> {
        artists::find_artist(self, name).await
    }

    async fn artist_albums(
        &self,
        artist_id: u64,
        page: u32,
    ) -> Result<Page<AlbumEntry>, ProviderError> {
        artists::get_artist_albums(self, artist_id, page).await
    }

    async fn album_tracks(
        &self,
        album_id: u64,
        page: u32,
    ) -> Result<Page<AlbumTrackEntry>, ProviderError> {
        songs::get_album_tracks(self, album_id, page).await
    }

    async fn artist_songs(
        &self,
        artist_id: u64,
        page: u32,
    ) -> Result<Page<SongSummary>, ProviderError> {
        artists::get_artist_songs(self, artist_id, page).await
    }

    async fn search_song(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<SongMatch>, ProviderError> {
        songs::search_song(self, title, artist).await
    }
}

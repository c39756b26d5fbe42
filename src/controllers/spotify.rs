// Spotify client-credentials auth and track search
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::models::track::{FoundTrack, SearchTracksResponse};
use crate::secrets::SECRET_MANAGER;

/// Spotify API endpoints
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// The app authenticates as itself; tokens are assumed valid for the whole
/// refresh window.
pub const TOKEN_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Current access token, written by the refresher task and read per search
/// request.
#[derive(Clone, Default)]
pub struct TokenHolder {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn store(&self, token: String) {
        *self.inner.write().await = Some(token);
    }

    pub async fn current(&self) -> Option<String> {
        self.inner.read().await.clone()
    }
}

#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new() -> Result<Self, String> {
        Self::with_endpoints(
            SECRET_MANAGER.get("SPOTIFY_CLIENT_ID"),
            SECRET_MANAGER.get("SPOTIFY_CLIENT_SECRET"),
            SPOTIFY_TOKEN_URL.to_string(),
            SPOTIFY_API_URL.to_string(),
        )
    }

    pub fn with_endpoints(
        client_id: String,
        client_secret: String,
        token_url: String,
        api_url: String,
    ) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build http client: {}", e))?;

        Ok(Self {
            client,
            client_id,
            client_secret,
            token_url,
            api_url,
        })
    }

    /// Get access token using the Client Credentials flow (no user login).
    pub async fn request_client_credentials(&self) -> Result<SpotifyTokens, String> {
        let params = [("grant_type", "client_credentials")];

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Client credentials auth failed: {}", error_text));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse tokens: {}", e))
    }

    /// Search for tracks, in catalog relevance order.
    pub async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u8,
    ) -> Result<Vec<FoundTrack>, String> {
        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .bearer_auth(access_token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Search failed: {}", error_text));
        }

        let page: SearchTracksResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse search results: {}", e))?;

        Ok(page.tracks.items)
    }
}

/// Refresh the stored token once; failures keep the previous token.
pub async fn refresh_access_token(spotify: &SpotifyClient, tokens: &TokenHolder) {
    info!("Fetching new spotify access token...");
    match spotify.request_client_credentials().await {
        Ok(granted) => {
            info!(
                "Spotify access token refreshed ({}), expires in {}s",
                granted.token_type, granted.expires_in
            );
            tokens.store(granted.access_token).await;
        }
        Err(e) => {
            error!("Spotify token refresh failed, keeping previous token: {}", e);
        }
    }
}

/// Periodic token refresh on a dedicated task. The first tick fires
/// immediately; refreshes run sequentially so ticks never overlap.
pub fn spawn_token_refresher(spotify: SpotifyClient, tokens: TokenHolder) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(TOKEN_REFRESH_INTERVAL);
        loop {
            ticker.tick().await;
            refresh_access_token(&spotify, &tokens).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unroutable_client() -> SpotifyClient {
        // Nothing listens on this port; every request fails fast.
        SpotifyClient::with_endpoints(
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://127.0.0.1:9/api/token".to_string(),
            "http://127.0.0.1:9/v1".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn token_holder_returns_latest_stored_token() {
        let holder = TokenHolder::new();
        assert_eq!(holder.current().await, None);

        holder.store("first".to_string()).await;
        assert_eq!(holder.current().await.as_deref(), Some("first"));

        holder.store("second".to_string()).await;
        assert_eq!(holder.current().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_token() {
        let holder = TokenHolder::new();
        holder.store("still-good".to_string()).await;

        refresh_access_token(&unroutable_client(), &holder).await;

        assert_eq!(holder.current().await.as_deref(), Some("still-good"));
    }

    #[tokio::test]
    async fn failed_refresh_on_empty_holder_stays_empty() {
        let holder = TokenHolder::new();

        refresh_access_token(&unroutable_client(), &holder).await;

        assert_eq!(holder.current().await, None);
    }

    #[tokio::test]
    async fn search_against_unreachable_api_is_an_error() {
        let err = unroutable_client()
            .search_tracks("token", "imagine", 5)
            .await
            .unwrap_err();
        assert!(err.contains("Request failed"));
    }
}

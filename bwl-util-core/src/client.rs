//! HTTP client for the Blueworks Live REST API.
//!
//! Implements [`CatalogApi`] over reqwest: blueprint reads, the archive
//! action and the library listing, plus OAuth2 client-credentials token
//! acquisition. The client holds a reporting token for reads and an optional
//! authoring token that the archive action prefers when present — the two
//! service accounts carry different permissions.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::contract::{
    ActionError, AuthError, BlueprintId, CatalogApi, FetchError, ListError,
};
use crate::blueprint::Blueprint;

/// OAuth2 client-credentials pair for one service account.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Bearer token returned by the token endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How many leading/trailing lines the listing response sheds before the
/// identifiers are normalised. The first line is always a header; whether
/// the final line is a blank artifact of the trailing newline varies between
/// deployments, so both policies are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingTrim {
    /// Drop the header line only.
    HeaderOnly,
    /// Drop the header line and the final (blank) line.
    HeaderAndTrailer,
}

impl Default for ListingTrim {
    fn default() -> Self {
        ListingTrim::HeaderAndTrailer
    }
}

/// Exchange client credentials for a bearer token.
///
/// `POST {root}/oauth/token`, form-encoded `grant_type=client_credentials`.
/// A missing or empty `access_token` in the response is an [`AuthError`],
/// which is fatal to the whole run.
pub async fn acquire_token(
    http: &reqwest::Client,
    root_url: &str,
    credentials: &ClientCredentials,
) -> Result<AccessToken, AuthError> {
    let url = format!("{}/oauth/token", root_url.trim_end_matches('/'));
    debug!(url = %url, client_id = %credentials.client_id, "Requesting access token");

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
    ];
    let response = http.post(&url).form(&form).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(AuthError::BadStatus(status.as_u16()));
    }

    #[derive(Deserialize)]
    struct TokenResponse {
        #[serde(default)]
        access_token: String,
    }

    let body: TokenResponse = response.json().await?;
    if body.access_token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    info!(client_id = %credentials.client_id, "Acquired access token");
    Ok(AccessToken(body.access_token))
}

/// Split a listing response body into normalised blueprint identifiers.
///
/// The body is newline-delimited; after the trim policy is applied, each
/// remaining line is unwrapped from its `/"..."` decoration. Lines are kept
/// as-is otherwise — the policy, not this function, decides what counts as
/// payload.
pub fn parse_listing(body: &str, trim: ListingTrim) -> Vec<BlueprintId> {
    let lines: Vec<&str> = body.split('\n').collect();
    let kept: &[&str] = match trim {
        ListingTrim::HeaderOnly => lines.get(1..).unwrap_or(&[]),
        ListingTrim::HeaderAndTrailer => lines
            .get(1..lines.len().saturating_sub(1))
            .unwrap_or(&[]),
    };
    kept.iter()
        .map(|raw| BlueprintId::new(raw.trim_matches(|c| c == '/' || c == '"')))
        .collect()
}

/// The real catalog client.
pub struct BwlClient {
    http: reqwest::Client,
    root_url: String,
    reporting_token: AccessToken,
    authoring_token: Option<AccessToken>,
    listing_trim: ListingTrim,
}

impl BwlClient {
    pub fn new(root_url: impl Into<String>, reporting_token: AccessToken) -> Self {
        let root_url = root_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            root_url,
            reporting_token,
            authoring_token: None,
            listing_trim: ListingTrim::default(),
        }
    }

    /// Token used for archive calls. Without it, archiving falls back to the
    /// reporting token (and will fail on accounts where reporting cannot
    /// author).
    pub fn with_authoring_token(mut self, token: AccessToken) -> Self {
        self.authoring_token = Some(token);
        self
    }

    pub fn with_listing_trim(mut self, trim: ListingTrim) -> Self {
        self.listing_trim = trim;
        self
    }
}

#[async_trait]
impl CatalogApi for BwlClient {
    async fn fetch_blueprint(&self, id: &BlueprintId) -> Result<Blueprint, FetchError> {
        let url = format!("{}/bwl/blueprints/{}", self.root_url, id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.reporting_token.as_str())
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::BadStatus(status.as_u16()));
        }
        let blueprint = response.json::<Blueprint>().await?;
        Ok(blueprint)
    }

    async fn archive_blueprint(&self, id: &BlueprintId) -> Result<(), ActionError> {
        let url = format!("{}/bwl/artifacts/{}", self.root_url, id);
        let token = self.authoring_token.as_ref().unwrap_or(&self.reporting_token);
        let response = self
            .http
            .put(&url)
            .query(&[("action", "archive")])
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ActionError::BadStatus(status.as_u16()));
        }
        Ok(())
    }

    async fn list_blueprint_ids<'a>(
        &self,
        space_id: Option<&'a str>,
    ) -> Result<Vec<BlueprintId>, ListError> {
        let mut url = format!(
            "{}/scr/api/LibraryArtifact?type=BLUEPRINT&returnFields=ID",
            self.root_url
        );
        if let Some(space) = space_id {
            url.push_str("&spaceId=");
            url.push_str(space);
        }
        debug!(url = %url, "Fetching blueprint listing");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.reporting_token.as_str())
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ListError::BadStatus(status.as_u16()));
        }
        let body = response.text().await?;
        let ids = parse_listing(&body, self.listing_trim);
        info!(count = ids.len(), "Listed blueprints");
        Ok(ids)
    }
}

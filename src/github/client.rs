// src/github/client.rs
// =============================================================================
// An authenticated HTTP client for the two GitHub endpoints we need:
//
// 1. The Git Trees API, to list every path in a branch:
//      https://api.github.com/repos/{owner}/{repo}/git/trees/{branch}?recursive=1
// 2. raw.githubusercontent.com, to fetch a file's bytes:
//      https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}
//
// Both requests carry the same Authorization header, so private repositories
// work as long as the token can read them.
//
// Rust concepts:
// - Default headers: set once on the reqwest Client, sent with every request
// - Url::path_segments_mut: appends path segments with percent-encoding, so
//   a file called "my notes.md" becomes "my%20notes.md" in the URL
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, ClientBuilder, Response};
use tracing::debug;
use url::Url;

use super::tree::TreeListing;
use crate::config::{RepositoryCoordinate, TOKEN_VAR};
use crate::error::{Error, Result};

// GitHub rejects API requests that have no User-Agent
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    raw_url: Url,
}

impl GitHubClient {
    pub fn new(token: &str, api_url: Url, raw_url: Url) -> Result<Self> {
        Self::with_builder(Client::builder(), token, api_url, raw_url)
    }

    // Lets callers tweak the reqwest client (proxy settings, for example)
    // before the auth headers are added
    pub fn with_builder(
        builder: ClientBuilder,
        token: &str,
        api_url: Url,
        raw_url: Url,
    ) -> Result<Self> {
        let http = builder.default_headers(default_headers(token)?).build()?;

        Ok(Self {
            http,
            api_url,
            raw_url,
        })
    }

    /// Fetches the full recursive tree listing for a branch in one request.
    ///
    /// Any network failure or non-2xx status (bad token, rate limit, unknown
    /// repository or branch) comes back as a transport error.
    pub async fn get_tree(&self, coordinate: &RepositoryCoordinate) -> Result<TreeListing> {
        let url = self.tree_url(coordinate)?;
        debug!(%url, "fetching tree listing");

        let listing = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?
            .error_for_status()?
            .json::<TreeListing>()
            .await?;

        debug!(entries = listing.tree.len(), truncated = listing.truncated, "tree listing received");
        Ok(listing)
    }

    /// Starts a download. The body has not been read yet when this returns.
    pub async fn get_raw(&self, url: &Url) -> Result<Response> {
        debug!(%url, "requesting raw content");
        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        Ok(response)
    }

    pub fn tree_url(&self, coordinate: &RepositoryCoordinate) -> Result<Url> {
        // The branch is one segment here, so "feature/x" is sent as "feature%2Fx"
        let mut url = append_segments(
            &self.api_url,
            [
                "repos",
                coordinate.owner.as_str(),
                coordinate.name.as_str(),
                "git",
                "trees",
                coordinate.branch.as_str(),
            ],
        )?;
        url.query_pairs_mut().append_pair("recursive", "1");
        Ok(url)
    }

    pub fn raw_url(&self, coordinate: &RepositoryCoordinate, path: &str) -> Result<Url> {
        let segments = [coordinate.owner.as_str(), coordinate.name.as_str()]
            .into_iter()
            .chain(coordinate.branch.split('/'))
            .chain(path.split('/'));

        append_segments(&self.raw_url, segments)
    }
}

fn default_headers(token: &str) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        Error::Configuration(format!(
            "{TOKEN_VAR} contains characters that are not allowed in an HTTP header"
        ))
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    Ok(headers)
}

fn append_segments<'a, I>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::Configuration(format!("{base} cannot be used as a base URL")))?
        // "https://api.github.com/" has one empty segment; drop it so we don't get "//repos"
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

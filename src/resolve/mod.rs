// src/resolve/mod.rs
// =============================================================================
// The tree resolver: turns "owner/repo@branch + optional path" into the list
// of files to download.
//
// Steps:
// 1. Fetch the recursive tree listing (one API call)
// 2. Select the blobs under the scope (select.rs)
// 3. Build a raw-content URL for each selected blob
//
// The result is a snapshot: nothing is added to or removed from it once the
// downloads start.
// =============================================================================

mod select;

pub use select::select;

use tracing::{info, warn};
use url::Url;

use crate::config::RepositoryCoordinate;
use crate::error::Result;
use crate::github::GitHubClient;

/// One file to download. Built once here, consumed once by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    relative_path: String,
    source_url: Url,
}

impl DownloadTask {
    pub fn new(relative_path: impl Into<String>, source_url: Url) -> Self {
        Self {
            relative_path: relative_path.into(),
            source_url,
        }
    }

    /// Slash-separated path relative to the repository root
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }
}

pub async fn resolve(
    github: &GitHubClient,
    coordinate: &RepositoryCoordinate,
    scope: &str,
) -> Result<Vec<DownloadTask>> {
    let listing = github.get_tree(coordinate).await?;

    if listing.truncated {
        warn!(
            repository = %coordinate,
            "GitHub truncated the tree listing; some files will not be downloaded"
        );
    }

    let tasks = select(&listing.tree, scope)?
        .into_iter()
        .map(|entry| {
            let url = github.raw_url(coordinate, &entry.path)?;
            Ok(DownloadTask::new(entry.path.clone(), url))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        repository = %coordinate,
        scope,
        entries = listing.tree.len(),
        selected = tasks.len(),
        "resolved download tasks"
    );
    Ok(tasks)
}

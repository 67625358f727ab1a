// src/config.rs
// =============================================================================
// The immutable run configuration.
//
// main.rs parses the command line into a Cli, then turns it into a Config
// exactly once. Everything downstream (GitHub client, resolver, fetcher)
// receives what it needs from this struct; nothing reads flags or the
// environment on its own.
//
// Validation done here, before any network call:
// - --owner and --repo must not be empty
// - GITHUB_TOKEN must be set and not empty
// - --api-url and --raw-url must be http(s) URLs we can append paths to
// =============================================================================

use std::num::NonZeroUsize;
use std::path::PathBuf;

use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Which repository, and which branch of it, to download from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCoordinate {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl std::fmt::Display for RepositoryCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.branch)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub coordinate: RepositoryCoordinate,
    /// Path inside the repository; empty means the whole repository
    pub scope: String,
    /// Local root to download into; empty means the current directory
    pub destination: PathBuf,
    pub token: String,
    pub api_url: Url,
    pub raw_url: Url,
    pub jobs: NonZeroUsize,
    pub dry_run: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Self::from_cli_with_env(cli, |key| std::env::var(key).ok())
    }

    // Same as from_cli, with the environment lookup passed in so tests don't
    // have to touch the real process environment
    pub fn from_cli_with_env<F>(cli: Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if cli.owner.is_empty() || cli.repo.is_empty() {
            return Err(Error::Configuration(
                "both --owner and --repo must be given".to_string(),
            ));
        }

        let token = lookup(TOKEN_VAR)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Configuration(format!("Please set '{TOKEN_VAR}' first.")))?;

        let api_url = base_url("--api-url", cli.api_url)?;
        let raw_url = base_url("--raw-url", cli.raw_url)?;

        Ok(Self {
            coordinate: RepositoryCoordinate {
                owner: cli.owner,
                name: cli.repo,
                branch: cli.branch,
            },
            scope: cli.path,
            destination: cli.dir.unwrap_or_default(),
            token,
            api_url,
            raw_url,
            jobs: cli.jobs,
            dry_run: cli.dry_run,
        })
    }
}

// Checks that a URL can have path segments appended to it
//
// "mailto:x" parses as a URL but has no path we could extend, and anything
// other than http(s) makes no sense for reqwest anyway.
fn base_url(flag: &str, url: Url) -> Result<Url> {
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::Configuration(format!(
            "{flag} must be an http(s) URL, got {url}"
        )));
    }
    Ok(url)
}

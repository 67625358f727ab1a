// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// repo-grab has a single command, so there are no subcommands here: the Cli
// struct is the whole interface. Every field becomes a --long-flag.
//
// The GitHub token is NOT a flag. It is read from the GITHUB_TOKEN
// environment variable in config.rs so it never shows up in shell history.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Option<T>: for flags that may be left out entirely
// - FromStr: clap can parse any type implementing it (Url, NonZeroUsize)
// =============================================================================

use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

// Flags that may also be written with a single dash, Go style: -owner rust-lang
const SINGLE_DASH_FLAGS: [&str; 5] = ["owner", "repo", "branch", "path", "dir"];

#[derive(Parser, Debug)]
#[command(
    name = "repo-grab",
    version,
    about = "Download a GitHub repository, or one directory or file of it",
    long_about = "repo-grab lists the file tree of a GitHub repository through the API and \
                  downloads every file under an optional path. Set GITHUB_TOKEN before running."
)]
pub struct Cli {
    /// Repository owner (user or organization), e.g. rust-lang
    #[arg(long)]
    pub owner: String,

    /// Repository name, e.g. log
    #[arg(long)]
    pub repo: String,

    /// Branch to download from
    #[arg(long, default_value = "master")]
    pub branch: String,

    /// Directory or file inside the repository to download
    ///
    /// Leave it out to download the whole repository.
    #[arg(long, default_value = "")]
    pub path: String,

    /// Local directory to download into (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// How many files to download at once
    ///
    /// With the default of 1, files are downloaded strictly one after
    /// another in listing order. Any failure stops the run either way.
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    pub jobs: NonZeroUsize,

    /// Only list the files that would be downloaded
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub REST API base URL (for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Base URL serving raw file contents
    #[arg(long, default_value = DEFAULT_RAW_URL)]
    pub raw_url: Url,
}

// Rewrites "-owner" and "-owner=x" to "--owner" and "--owner=x" so clap
// accepts them. Everything else, values included, passes through unchanged.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(flag) = arg.to_str().and_then(|text| text.strip_prefix('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);

            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("--{flag}"))
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["repo-grab", "--owner", "rust-lang", "--repo", "log"]).unwrap();

        assert_eq!(cli.owner, "rust-lang");
        assert_eq!(cli.repo, "log");
        assert_eq!(cli.branch, "master");
        assert_eq!(cli.path, "");
        assert_eq!(cli.dir, None);
        assert_eq!(cli.jobs.get(), 1);
        assert!(!cli.dry_run);
        assert_eq!(cli.api_url.as_str(), "https://api.github.com/");
        assert_eq!(cli.raw_url.as_str(), "https://raw.githubusercontent.com/");
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "repo-grab", "--owner", "o", "--repo", "r", "--branch", "main", "--path", "docs",
            "--dir", "out", "--jobs", "4", "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.branch, "main");
        assert_eq!(cli.path, "docs");
        assert_eq!(cli.dir, Some(PathBuf::from("out")));
        assert_eq!(cli.jobs.get(), 4);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_owner_and_repo_are_required() {
        assert!(Cli::try_parse_from(["repo-grab", "--repo", "log"]).is_err());
        assert!(Cli::try_parse_from(["repo-grab", "--owner", "rust-lang"]).is_err());
    }

    #[test]
    fn test_single_dash_flags() {
        let cli = Cli::try_parse_from(normalize_args([
            "repo-grab", "-owner", "o", "-repo", "r", "-branch=main", "-path", "docs", "-dir", "out",
        ]))
        .unwrap();

        assert_eq!(cli.owner, "o");
        assert_eq!(cli.repo, "r");
        assert_eq!(cli.branch, "main");
        assert_eq!(cli.path, "docs");
        assert_eq!(cli.dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_normalize_args_leaves_other_arguments_alone() {
        let args = normalize_args(["repo-grab", "--owner", "o", "-jobs", "-h", "-ownerx", "--path=-dir"]);
        assert_eq!(
            args,
            ["repo-grab", "--owner", "o", "-jobs", "-h", "-ownerx", "--path=-dir"]
                .map(OsString::from)
        );
    }

    #[test]
    fn test_zero_jobs_is_rejected() {
        let result = Cli::try_parse_from(["repo-grab", "--owner", "o", "--repo", "r", "--jobs", "0"]);
        assert!(result.is_err());
    }
}

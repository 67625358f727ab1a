// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the immutable Config (checks GITHUB_TOKEN before any network call)
// 3. Resolve the list of files to download from the repository tree
// 4. Download them, stopping at the first failure
// 5. Exit with proper code (0 = success, 1 = failure, 2 = configuration error)
//
// Rust concepts used:
// - async/await: reqwest and tokio::fs are async; we run them on a
//   single-threaded runtime since everything happens one step at a time
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - the immutable run configuration
mod error;      // src/error.rs - typed errors and the combine() helper
mod exit_codes; // src/exit_codes.rs - process exit codes
mod fetch;      // src/fetch/ - downloading files to disk
mod github;     // src/github/ - GitHub API client
mod logging;    // src/logging.rs - RUST_LOG diagnostics
mod resolve;    // src/resolve/ - choosing which files to download
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use config::Config;
use error::ErrorKind;
use fetch::Fetcher;
use github::GitHubClient;

// current_thread: one task runs at a time, which is all a sequential
// downloader needs
#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let exit_code = match run().await {
        Ok(()) => exit_codes::OK,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            println!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<error::Error>().map(error::Error::kind) {
        Some(ErrorKind::Configuration) => exit_codes::CONFIGURATION,
        _ => exit_codes::FAILURE,
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments into our Cli struct
    // Missing --owner/--repo prints usage and exits with code 2 right here
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    let config = Config::from_cli(cli)?;

    let github = GitHubClient::new(&config.token, config.api_url.clone(), config.raw_url.clone())?;

    println!("🔍 Listing repository: {}", config.coordinate);

    let tasks = resolve::resolve(&github, &config.coordinate, &config.scope)
        .await
        .with_context(|| format!("listing {}", config.coordinate))?;

    if tasks.is_empty() {
        println!("⚠️  No files to download");
        return Ok(());
    }

    println!("📄 Found {} file(s) to download", tasks.len());

    if config.dry_run {
        for task in &tasks {
            println!("   {}", task.relative_path());
        }
        return Ok(());
    }

    let summary = Fetcher::new(&github, &config.destination, config.jobs)
        .download_all(&tasks)
        .await
        .context("download failed")?;

    println!();
    println!("📊 Summary:");
    println!("   📋 Files: {}", summary.files);
    println!("   💾 Bytes: {}", summary.bytes);
    println!("   📁 Into:  {}", display_destination(&config));

    Ok(())
}

fn display_destination(config: &Config) -> String {
    if config.destination.as_os_str().is_empty() {
        ".".to_string()
    } else {
        config.destination.display().to_string()
    }
}

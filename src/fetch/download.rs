// src/fetch/download.rs
// =============================================================================
// Downloads a single file.
//
// How it works:
// 1. GET the raw-content URL (non-2xx is an error)
// 2. Work out the local path: destination root + the repository path
// 3. Create missing parent directories (0755 on Unix)
// 4. Create or truncate the file (0644 on Unix)
// 5. Stream the body into the file one chunk at a time
// 6. Flush the file, and combine a flush error with any copy error
//    (tokio reports a failed background write on the next flush)
//
// The response and the file are plain owned values: whichever way this
// function returns, they are dropped and their resources released. The one
// thing a drop cannot do is report an error, which is why the file is
// flushed explicitly before it goes out of scope.
//
// Rust concepts:
// - Ownership/RAII: no manual close calls on every error branch
// - #[cfg(unix)]: permission bits only exist on Unix-like systems
// =============================================================================

use std::path::{Path, PathBuf};

use reqwest::Response;
use tokio::fs::{DirBuilder, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{combine, Error, Result};
use crate::github::GitHubClient;
use crate::resolve::DownloadTask;

/// Downloads one task into `destination` and returns the number of bytes written.
///
/// An existing file at the target path is overwritten.
pub async fn download(github: &GitHubClient, task: &DownloadTask, destination: &Path) -> Result<u64> {
    let response = github.get_raw(task.source_url()).await?;

    let target = local_path(destination, task.relative_path());
    if let Some(parent) = target.parent() {
        create_parent_dirs(parent).await?;
    }

    let mut file = open_target(&target).await?;
    let copied = copy_body(response, &mut file, &target).await;
    let closed = close(file, &target).await;
    let written = combine(copied, closed)?;

    debug!(path = %target.display(), bytes = written, "file written");
    Ok(written)
}

// Joins the repository path onto the destination one segment at a time, so
// "docs/guide.md" becomes docs\guide.md on Windows
pub fn local_path(destination: &Path, relative_path: &str) -> PathBuf {
    let mut path = destination.to_path_buf();
    path.extend(relative_path.split('/').filter(|segment| !segment.is_empty()));
    path
}

async fn create_parent_dirs(dir: &Path) -> Result<()> {
    // "a.txt" downloaded into the current directory has an empty parent
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);

    builder
        .create(dir)
        .await
        .map_err(|source| Error::filesystem("create directory", dir, source))
}

async fn open_target(target: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o644);

    options
        .open(target)
        .await
        .map_err(|source| Error::filesystem("create", target, source))
}

// Read errors come from reqwest (transport), write errors from the file
async fn copy_body(mut response: Response, file: &mut File, target: &Path) -> Result<u64> {
    let mut written = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|source| Error::filesystem("write", target, source))?;
        written += chunk.len() as u64;
    }
    Ok(written)
}

async fn close(mut file: File, target: &Path) -> Result<()> {
    file.flush()
        .await
        .map_err(|source| Error::filesystem("flush", target, source))
}

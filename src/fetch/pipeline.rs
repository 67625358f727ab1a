// src/fetch/pipeline.rs
// =============================================================================
// Runs the downloads for a whole task list.
//
// Failure semantics:
// - tasks are started in listing order
// - the first failure stops the run; files already written stay on disk
// - the error names the task that failed
//
// With jobs = 1 (the default) this is strictly sequential: the next download
// does not start until the previous one is fully on disk.
//
// With jobs > 1 up to that many downloads are in flight at once. We use
// `buffered` (not `buffer_unordered`) so results still come back in listing
// order, which means the reported failure is the earliest failing task in
// the window. Returning early drops the stream, and dropping it cancels any
// downloads that are still running.
// =============================================================================

use std::num::NonZeroUsize;
use std::path::Path;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use super::download::download;
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::resolve::DownloadTask;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub bytes: u64,
}

pub struct Fetcher<'a> {
    github: &'a GitHubClient,
    destination: &'a Path,
    jobs: NonZeroUsize,
}

impl<'a> Fetcher<'a> {
    pub fn new(github: &'a GitHubClient, destination: &'a Path, jobs: NonZeroUsize) -> Self {
        Self {
            github,
            destination,
            jobs,
        }
    }

    pub async fn download_all(&self, tasks: &[DownloadTask]) -> Result<Summary> {
        let downloads = tasks.iter().map(move |task| async move {
            download(self.github, task, self.destination)
                .await
                .map(|bytes| (task, bytes))
                .map_err(|err| err.for_task(task.relative_path()))
        });

        stream::iter(downloads)
            .buffered(self.jobs.get())
            .try_fold(Summary::default(), |mut summary, (task, bytes)| async move {
                println!("   ⬇️  {} ({} bytes)", task.relative_path(), bytes);
                info!(path = task.relative_path(), bytes, "downloaded");

                summary.files += 1;
                summary.bytes += bytes;
                Ok::<_, Error>(summary)
            })
            .await
    }
}

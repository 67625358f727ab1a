// src/github/mod.rs
// =============================================================================
// This module talks to GitHub.
//
// - client: authenticated reqwest client, URL building for both endpoints
// - tree: serde types for the recursive tree listing
//
// Nothing here decides WHICH files to download; that is resolve/.
// =============================================================================

mod client;
mod tree;

pub use client::GitHubClient;
pub use tree::{EntryKind, TreeEntry};

// src/github/tree.rs
// =============================================================================
// Types for the GitHub "Git Trees" API response.
//
//   GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
//
// With recursive=1 the response lists every file and directory in the
// repository as one flat array, in the order GitHub walks the tree:
//
//   {
//     "sha": "9fb037999f264ba9a7fc6274d15fa3ae2ab98312",
//     "tree": [
//       { "path": "README.md", "type": "blob", ... },
//       { "path": "src", "type": "tree", ... },
//       { "path": "src/main.rs", "type": "blob", ... }
//     ],
//     "truncated": false
//   }
//
// We only keep the fields we use; serde ignores the rest (mode, sha, size, url).
// =============================================================================

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TreeListing {
    pub tree: Vec<TreeEntry>,
    /// GitHub stops listing very large trees and sets this to true
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated, relative to the repository root
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// Anything else, e.g. "commit" for a submodule. Never downloaded.
    #[serde(other)]
    Other,
}

impl TreeEntry {
    #[cfg(test)]
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

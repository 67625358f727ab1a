// src/resolve/select.rs
// =============================================================================
// Picks which tree entries to download for a given --path scope.
//
// Rules:
// - empty scope        -> every blob (file) in the tree
// - scope is a tree    -> every blob whose path starts with "scope/"
// - scope is a blob    -> exactly that one blob
// - scope not in tree  -> NotFound error
//
// A file scope is matched by equality, not by prefix. With prefix matching
// "a" would also select "a2.txt" and "a.bak", which is never what the user
// asked for. Likewise a directory prefix always ends in "/", so "docs" does
// not pick up "docs-old/index.md".
//
// Leading and trailing slashes are ignored on both sides, so "--path src/"
// and "--path src" mean the same directory. A scope made only of slashes
// matches nothing.
//
// Rust concepts:
// - Lifetimes: Selection<'a> borrows the scope string from the entries
//   slice instead of copying it
// - Iterator adapters: filter() keeps the listing order intact
// =============================================================================

use crate::error::{Error, Result};
use crate::github::{EntryKind, TreeEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection<'a> {
    Everything,
    Directory { prefix: String },
    File { path: &'a str },
}

impl Selection<'_> {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Everything => true,
            Self::Directory { prefix } => path.starts_with(prefix.as_str()),
            Self::File { path: file } => path == *file,
        }
    }
}

fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

// Looks the scope up in the tree and decides how to filter
fn selection_for<'a>(entries: &'a [TreeEntry], scope: &str) -> Result<Selection<'a>> {
    if scope.is_empty() {
        return Ok(Selection::Everything);
    }

    // "/" names no entry at all; it is not another way to say "everything"
    let raw = scope;
    let scope = normalize(scope);
    if scope.is_empty() {
        return Err(Error::NotFound {
            path: raw.to_string(),
        });
    }

    let entry = entries
        .iter()
        .find(|entry| normalize(&entry.path) == scope)
        .ok_or_else(|| Error::NotFound {
            path: scope.to_string(),
        })?;

    Ok(match entry.kind {
        EntryKind::Tree => Selection::Directory {
            prefix: format!("{scope}/"),
        },
        // A submodule ("commit") lands here too; it is not a blob, so the
        // selection comes out empty
        EntryKind::Blob | EntryKind::Other => Selection::File {
            path: normalize(&entry.path),
        },
    })
}

/// Returns the blobs to download, in listing order.
pub fn select<'a>(entries: &'a [TreeEntry], scope: &str) -> Result<Vec<&'a TreeEntry>> {
    let selection = selection_for(entries, scope)?;

    Ok(entries
        .iter()
        .filter(|entry| entry.is_blob())
        .filter(|entry| selection.matches(normalize(&entry.path)))
        .collect())
}

// src/fetch/mod.rs
// =============================================================================
// The fetcher: writes resolved tasks to disk.
//
// Submodules:
// - download: one task -> one local file
// - pipeline: the whole task list, stopping at the first failure
// =============================================================================

mod download;
mod pipeline;

pub use pipeline::Fetcher;

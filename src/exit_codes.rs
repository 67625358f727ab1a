// src/exit_codes.rs
// Process exit codes. There is no "partially downloaded" code: any failure
// after the first file is still a failure.

/// Every selected file was downloaded.
pub const OK: i32 = 0;
/// Listing or downloading failed, or the --path scope was not found.
pub const FAILURE: i32 = 1;
/// A required flag or GITHUB_TOKEN is missing. Same code clap uses for usage errors.
pub const CONFIGURATION: i32 = 2;

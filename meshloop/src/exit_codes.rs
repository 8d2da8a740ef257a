//! Stable exit codes for the `meshloop` CLI.

/// The loop stopped gracefully, however many iterations ran.
pub const OK: i32 = 0;
/// Fatal error: build failure, more than one mesh path, invalid config.
pub const FATAL: i32 = 1;

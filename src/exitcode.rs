//! Process exit codes.

/// Successful termination, including a generation failure that was reported.
pub const OK: i32 = 0;

/// `XAI_API_KEY` was missing or blank.
pub const MISSING_API_KEY: i32 = 1;

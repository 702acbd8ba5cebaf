//! Git history access.

pub mod commit;
pub mod repository;

pub use commit::{parse_log_export, CommitRecord, CommitSource, LogExportSource};
pub use repository::GitRepository;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;

/// Length of a full SHA-1 commit hash in hex characters.
pub const FULL_HASH_LEN: usize = 40;

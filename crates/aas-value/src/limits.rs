//! Limits applied to untrusted value-only input.
//!
//! Paths and JSON payloads arrive from clients; everything else is bounded
//! by the canonical tree the caller already holds.

/// Maximum length of an idShort path string in bytes.
pub const MAX_PATH_LEN: usize = 4096;

/// Maximum number of segments (idShorts plus list indexes) in a path.
pub const MAX_PATH_SEGMENTS: usize = 256;

/// Maximum decoded size of a blob value (16 MiB).
pub const MAX_BLOB_LEN: usize = 16 * 1024 * 1024;

/// Maximum length of an idShort.
pub const MAX_ID_SHORT_LEN: usize = 128;

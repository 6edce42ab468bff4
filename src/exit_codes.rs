//! Exit code constants for the skaffix CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or unwritable file)
//! - 2: Unknown schema version
//! - 3: Config could not be decoded for its declared version

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or a failed file operation.
pub const USER_ERROR: i32 = 1;

/// The config declares an `apiVersion` that is not registered.
pub const UNKNOWN_VERSION: i32 = 2;

/// The config is malformed for its declared version.
pub const DECODE_FAILURE: i32 = 3;

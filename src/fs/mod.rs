//! Filesystem helpers for the CLI.
//!
//! The migration core never touches the filesystem; only `fix --overwrite`
//! writes, and it must never leave a half-written config behind.

pub mod atomic;

pub use atomic::atomic_write_file;

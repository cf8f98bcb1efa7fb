//! Shared utilities for archcfg.
//!
//! Cross-cutting concerns used by the other archcfg crates: the error type,
//! filesystem helpers, hashing, process spawning for compiler probes, and
//! terminal status lines.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;

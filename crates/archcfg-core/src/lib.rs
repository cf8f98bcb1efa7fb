//! Core data types for archcfg.
//!
//! A build profile records how to compile and link one application on one
//! platform/toolchain combination: compiler executables per build variant,
//! architecture and link flags, Fortran runtime libraries, precision flags,
//! and the install locations of third-party dependencies.
//!
//! Loading never consults ambient process state directly. Environment
//! values (notably `HOME`) are passed in through
//! [`properties::Environment`].

pub mod builtin;
pub mod compiler;
pub mod config;
pub mod dependency;
pub mod profile;
pub mod properties;
pub mod store;
pub mod template;
pub mod validate;
pub mod variant;

/// File extension of profile files on disk.
pub const PROFILE_EXTENSION: &str = "toml";

/// Name of the per-directory environment override file.
pub const ENV_FILE_NAME: &str = ".archcfg.env";

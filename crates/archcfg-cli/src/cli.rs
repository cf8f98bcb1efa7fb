//! CLI argument definitions for archcfg.
//!
//! Uses `clap` derive macros. Each command corresponds to a handler in the
//! [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use archcfg_core::dependency::Dependency;
use archcfg_core::variant::{Precision, Variant};
use archcfg_ops::ops_env::EnvFormat;
use archcfg_ops::ops_show::ShowFormat;

#[derive(Parser, Debug)]
#[command(
    name = "archcfg",
    version,
    about = "Per-platform build profiles: compilers, flags and library paths",
    long_about = "archcfg loads named build profiles describing the compilers, flags, \
                  Fortran runtime and third-party library locations of a platform, \
                  validates them, and exports them for a build."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra profile directory, searched before configured ones
    #[arg(
        long = "profile-dir",
        global = true,
        env = "ARCHCFG_PATH",
        value_delimiter = ':'
    )]
    pub profile_dirs: Vec<PathBuf>,

    /// Default profile when a command is given none
    #[arg(long, global = true, env = "ARCHCFG_PROFILE")]
    pub profile: Option<String>,

    /// Home directory used for ${env:HOME} (overrides $HOME)
    #[arg(long, global = true)]
    pub home: Option<String>,

    /// Ignore the profiles built into archcfg
    #[arg(long, global = true)]
    pub no_builtin: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List visible profiles and where they come from
    List {
        /// Only names matching this glob, e.g. `linux_*`
        pattern: Option<String>,
    },

    /// Print a resolved profile
    Show {
        /// Profile name (default: --profile)
        name: Option<String>,
        /// Output format: toml, json
        #[arg(long, default_value = "toml")]
        format: ShowFormat,
    },

    /// Validate profiles
    Check {
        /// Profiles to check (default: --profile)
        names: Vec<String>,
        /// Check every visible profile
        #[arg(long, conflicts_with = "names")]
        all: bool,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
        /// Dependencies that must have a path, e.g. `charm,hdf5`
        #[arg(long, value_delimiter = ',')]
        require: Option<Vec<Dependency>>,
    },

    /// Export a profile as variables for one build variant
    Env {
        /// Profile name (default: --profile)
        name: Option<String>,
        /// Build variant: serial, mpi, charm
        #[arg(long)]
        variant: Variant,
        /// Also export PREC_FLAGS for this precision
        #[arg(long)]
        precision: Option<Precision>,
        /// Output format: sh, json
        #[arg(long, default_value = "sh")]
        format: EnvFormat,
    },

    /// Create a new profile file
    New {
        /// Profile name
        name: String,
        /// Copy an existing profile instead of the blank template
        #[arg(long)]
        from: Option<String>,
        /// Directory to write into (default: first profile directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Set or remove one value in a profile file
    Set {
        /// Profile name
        name: String,
        /// Dotted key, e.g. `paths.hdf5` or `compilers.cxx.mpi`
        key: String,
        /// New value, parsed as TOML when possible
        #[arg(required_unless_present = "unset")]
        value: Option<String>,
        /// Remove the key instead
        #[arg(long, conflicts_with = "value")]
        unset: bool,
    },

    /// Check that a profile's compilers and paths exist on this machine
    Doctor {
        /// Profile name (default: --profile)
        name: Option<String>,
        /// Build variant whose compilers to probe
        #[arg(long, default_value = "serial")]
        variant: Variant,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

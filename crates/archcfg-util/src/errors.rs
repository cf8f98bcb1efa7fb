use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all archcfg operations.
///
/// Every profile-related variant carries the profile name so the report
/// tells the user which file to fix.
#[derive(Debug, Error, Diagnostic)]
pub enum ArchError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No profile with the requested name exists on the search path.
    #[error("Profile '{name}' not found (searched: {searched})")]
    #[diagnostic(help(
        "Run `archcfg list` to see available profiles, or add a directory with --profile-dir"
    ))]
    ProfileNotFound { name: String, searched: String },

    /// The profile file exists but could not be read.
    #[error("Failed to read profile '{profile}' from {path}")]
    ReadProfile {
        profile: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The profile file exists but is not valid TOML or does not match the schema.
    #[error("Malformed profile '{profile}': {message}")]
    #[diagnostic(help("Check the profile file for syntax errors and unknown keys"))]
    Parse { profile: String, message: String },

    /// A `${env:VAR}` reference names a variable that is not set.
    #[error("Profile '{profile}': field `{field}` references unset variable `{variable}`")]
    #[diagnostic(help("Export the variable, add it to .archcfg.env, or pass --home for HOME"))]
    UnsetVariable {
        profile: String,
        field: String,
        variable: String,
    },

    /// A compiler could not be resolved for a language/variant pair.
    #[error("Profile '{profile}': {message}")]
    Compiler { profile: String, message: String },

    /// A setting an operation needs is absent from the profile.
    #[error("Profile '{profile}': `{field}` is not set")]
    MissingSetting { profile: String, field: String },

    /// The profile loaded but failed validation.
    #[error("Profile '{profile}' failed validation: {message}")]
    Validation { profile: String, message: String },

    /// Invalid global or project configuration.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.archcfg/config.toml or Archcfg.toml"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

//! Profile lookup and loading.
//!
//! A [`ProfileStore`] searches an ordered list of directories for
//! `<name>.toml` and falls back to the profiles embedded in the binary.
//! The first match wins.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use archcfg_util::errors::ArchError;

use crate::builtin;
use crate::profile::{BuildProfile, ProfileFile};
use crate::properties::{load_env_file, Environment};
use crate::{ENV_FILE_NAME, PROFILE_EXTENSION};

/// Where a profile was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A file on disk.
    File(PathBuf),
    /// Embedded in the binary.
    Builtin,
}

impl Origin {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Origin::Builtin)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Origin::File(p) => Some(p),
            Origin::Builtin => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(p) => write!(f, "{}", p.display()),
            Origin::Builtin => f.write_str("<built-in>"),
        }
    }
}

/// A profile name together with where it would be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    pub name: String,
    pub origin: Origin,
}

/// The raw text of a profile before parsing.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    pub name: String,
    pub origin: Origin,
    pub text: String,
}

/// Ordered search path of profile directories.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dirs: Vec<PathBuf>,
    builtins: bool,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::builtin_only()
    }
}

impl ProfileStore {
    /// Search `dirs` in order, then the built-in profiles.
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
            builtins: true,
        }
    }

    pub fn builtin_only() -> Self {
        Self::new(Vec::new())
    }

    /// Enable or disable the built-in fallback.
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    fn searched(&self) -> String {
        let mut parts: Vec<String> = self.dirs.iter().map(|d| d.display().to_string()).collect();
        if self.builtins {
            parts.push(Origin::Builtin.to_string());
        }
        if parts.is_empty() {
            "nothing".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Find the raw text of profile `name`.
    pub fn source(&self, name: &str) -> Result<ProfileSource, ArchError> {
        validate_name(name)?;
        let file_name = format!("{name}.{PROFILE_EXTENSION}");
        for dir in &self.dirs {
            let path = dir.join(&file_name);
            if path.is_file() {
                tracing::debug!("profile '{name}' found at {}", path.display());
                let text =
                    std::fs::read_to_string(&path).map_err(|source| ArchError::ReadProfile {
                        profile: name.to_string(),
                        path: path.display().to_string(),
                        source,
                    })?;
                return Ok(ProfileSource {
                    name: name.to_string(),
                    origin: Origin::File(path),
                    text,
                });
            }
        }
        if self.builtins {
            if let Some(text) = builtin::get(name) {
                tracing::debug!("profile '{name}' is built in");
                return Ok(ProfileSource {
                    name: name.to_string(),
                    origin: Origin::Builtin,
                    text: text.to_string(),
                });
            }
        }
        Err(ArchError::ProfileNotFound {
            name: name.to_string(),
            searched: self.searched(),
        })
    }

    /// Load and resolve profile `name`.
    ///
    /// Profiles read from a directory see that directory's `.archcfg.env`
    /// on top of `env`. Loading has no side effects, so repeated loads with
    /// the same inputs give equal profiles.
    pub fn load(&self, name: &str, env: &Environment) -> Result<BuildProfile, ArchError> {
        let source = self.source(name)?;
        let file = ProfileFile::parse(name, &source.text)?;

        let env = match source.origin.path().and_then(Path::parent) {
            Some(dir) => {
                let overrides = load_env_file(&dir.join(ENV_FILE_NAME))?;
                if overrides.is_empty() {
                    env.clone()
                } else {
                    tracing::debug!(
                        "applying {} override(s) from {}",
                        overrides.len(),
                        dir.join(ENV_FILE_NAME).display()
                    );
                    env.overlay(&overrides)
                }
            }
            None => env.clone(),
        };

        BuildProfile::resolve(name, source.origin, &file, &env)
    }

    /// Every visible profile, sorted by name.
    ///
    /// A name present in several places is listed once, with the origin
    /// that [`ProfileStore::load`] would use.
    pub fn list(&self) -> Result<Vec<ProfileEntry>, ArchError> {
        let mut found: BTreeMap<String, Origin> = BTreeMap::new();
        for dir in &self.dirs {
            if !dir.is_dir() {
                tracing::debug!("skipping missing profile directory {}", dir.display());
                continue;
            }
            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();
                if !path.is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION)
                {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if validate_name(stem).is_err() {
                    continue;
                }
                found
                    .entry(stem.to_string())
                    .or_insert_with(|| Origin::File(path.clone()));
            }
        }
        if self.builtins {
            for name in builtin::names() {
                found.entry(name.to_string()).or_insert(Origin::Builtin);
            }
        }
        Ok(found
            .into_iter()
            .map(|(name, origin)| ProfileEntry { name, origin })
            .collect())
    }

    /// Load every visible profile, keeping per-profile failures.
    #[allow(clippy::type_complexity)]
    pub fn load_all(
        &self,
        env: &Environment,
    ) -> Result<Vec<(String, Result<BuildProfile, ArchError>)>, ArchError> {
        Ok(self
            .list()?
            .into_iter()
            .map(|entry| {
                let result = self.load(&entry.name, env);
                (entry.name, result)
            })
            .collect())
    }
}

/// Profile names are file stems: ASCII letters, digits, `_`, `-` and `.`,
/// not starting with a dot.
pub fn validate_name(name: &str) -> Result<(), ArchError> {
    let ok = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(ArchError::Generic {
            message: format!(
                "Invalid profile name '{name}': use letters, digits, '_', '-' or '.'"
            ),
        })
    }
}

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Variables visible to `${env:NAME}` references while loading a profile.
///
/// The loader only ever sees what is placed here; callers decide whether
/// that is the real process environment, a fixed map, or a mix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    /// Keys that [`Environment::overlay`] must not replace.
    pinned: BTreeSet<String>,
}

impl Environment {
    /// An environment with no variables at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 cannot be referenced
    /// from a profile and are left out.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    tracing::debug!("ignoring non-UTF-8 environment variable {k:?}");
                    None
                }
            })
            .collect();
        Self {
            vars,
            pinned: BTreeSet::new(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            pinned: BTreeSet::new(),
        }
    }

    /// Set `HOME`, replacing any inherited value.
    ///
    /// The injected home is pinned: a `.archcfg.env` overlay cannot change it.
    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.vars.insert("HOME".to_string(), home.into());
        self.pinned.insert("HOME".to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn home(&self) -> Option<PathBuf> {
        self.get("HOME")
            .or_else(|| self.get("USERPROFILE"))
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
    }

    /// A copy of this environment with `overrides` taking precedence over
    /// everything except pinned keys.
    pub fn overlay(&self, overrides: &BTreeMap<String, String>) -> Self {
        let mut merged = self.clone();
        for (key, value) in overrides {
            if self.pinned.contains(key) {
                tracing::debug!("keeping injected {key}; ignoring override");
                continue;
            }
            merged.vars.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// Loads a `.archcfg.env` file (shell-style `KEY=value` lines).
///
/// Blank lines and `#` comments are skipped, a leading `export ` is
/// accepted, and values may be wrapped in single or double quotes.
/// A missing file yields an empty map.
pub fn load_env_file(path: &Path) -> std::io::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
    }
    Ok(map)
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Why a `${env:NAME}` reference could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("variable `{0}` is not set")]
    Unset(String),

    #[error("unterminated `${{env:` reference")]
    Unterminated,
}

/// Expand `${env:NAME}` references in `input` from `env`.
///
/// Unlike shell expansion, an unset variable is an error, never an empty
/// string.
pub fn interpolate(input: &str, env: &Environment) -> Result<String, InterpolationError> {
    const OPEN: &str = "${env:";
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let end = after.find('}').ok_or(InterpolationError::Unterminated)?;
        let key = after[..end].trim();
        let value = env
            .get(key)
            .ok_or_else(|| InterpolationError::Unset(key.to_string()))?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

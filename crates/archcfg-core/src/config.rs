use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use archcfg_util::errors::ArchError;
use archcfg_util::fs::{find_ancestor_with, resolve_against};

use crate::dependency::Dependency;
use crate::properties::Environment;
use crate::store::ProfileStore;
use crate::validate::{default_required, Requirements};

/// File name of the project-level configuration.
pub const PROJECT_FILE: &str = "Archcfg.toml";

/// Settings shared by `~/.archcfg/config.toml` and `Archcfg.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchConfig {
    #[serde(default)]
    pub profiles: ProfilesConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

/// `[profiles]`: where to look and what to load by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    /// Profile directories, relative to the file that declares them.
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
}

/// `[check]`: validation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    #[serde(default)]
    pub require: Option<Vec<Dependency>>,
    #[serde(default)]
    pub strict: Option<bool>,
}

impl ArchConfig {
    pub fn from_str(content: &str, origin: &Path) -> Result<Self, ArchError> {
        toml::from_str(content).map_err(|e| ArchError::Config {
            message: format!("Failed to parse {}: {e}", origin.display()),
        })
    }

    /// Load `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ArchError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ArchError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content, path)
    }
}

/// Path of the archcfg data directory (`$HOME/.archcfg`), if `HOME` is known.
pub fn dirs_path(env: &Environment) -> Option<PathBuf> {
    env.home().map(|h| h.join(".archcfg"))
}

/// Path of the global config file, if `HOME` is known.
pub fn global_config_path(env: &Environment) -> Option<PathBuf> {
    dirs_path(env).map(|d| d.join("config.toml"))
}

/// Values given on the command line or through `ARCHCFG_*` variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile_dirs: Vec<PathBuf>,
    pub profile: Option<String>,
    pub require: Option<Vec<Dependency>>,
    pub strict: bool,
    /// Skip the built-in profiles.
    pub no_builtin: bool,
}

/// The effective configuration after layering every source.
///
/// Search order: overrides, project file, global file, built-ins.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub dirs: Vec<PathBuf>,
    pub default_profile: Option<String>,
    pub requirements: Requirements,
    pub builtins: bool,
    pub project_file: Option<PathBuf>,
    pub global_file: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn resolve(
        overrides: &Overrides,
        cwd: &Path,
        env: &Environment,
    ) -> Result<Self, ArchError> {
        let project = find_ancestor_with(cwd, PROJECT_FILE).map(|dir| dir.join(PROJECT_FILE));
        let project_cfg = match &project {
            Some(path) => {
                tracing::debug!("using project config {}", path.display());
                ArchConfig::load(path)?
            }
            None => ArchConfig::default(),
        };

        let global = global_config_path(env);
        let global_cfg = match &global {
            Some(path) => ArchConfig::load(path)?,
            None => {
                tracing::debug!("HOME is not set; skipping global config");
                ArchConfig::default()
            }
        };

        let mut dirs: Vec<PathBuf> = overrides.profile_dirs.clone();
        for (file, cfg) in [(&project, &project_cfg), (&global, &global_cfg)] {
            let Some(base) = file.as_deref().and_then(Path::parent) else {
                continue;
            };
            dirs.extend(cfg.profiles.paths.iter().map(|p| resolve_against(base, p)));
        }

        let default_profile = overrides
            .profile
            .clone()
            .or_else(|| project_cfg.profiles.default.clone())
            .or_else(|| global_cfg.profiles.default.clone());

        let required: BTreeSet<Dependency> = overrides
            .require
            .clone()
            .or_else(|| project_cfg.check.require.clone())
            .or_else(|| global_cfg.check.require.clone())
            .map(|deps| deps.into_iter().collect())
            .unwrap_or_else(default_required);

        let strict = overrides.strict
            || project_cfg
                .check
                .strict
                .or(global_cfg.check.strict)
                .unwrap_or(false);

        Ok(Self {
            dirs,
            default_profile,
            requirements: Requirements { required, strict },
            builtins: !overrides.no_builtin,
            project_file: project.filter(|p| p.is_file()),
            global_file: global.filter(|p| p.is_file()),
        })
    }

    pub fn store(&self) -> ProfileStore {
        ProfileStore::new(self.dirs.clone()).with_builtins(self.builtins)
    }

    /// `name` if given, else the configured default.
    pub fn profile_name(&self, name: Option<&str>) -> Result<String, ArchError> {
        name.map(str::to_string)
            .or_else(|| self.default_profile.clone())
            .ok_or_else(|| ArchError::Config {
                message: "No profile given and no default profile configured \
                          (pass a name, set ARCHCFG_PROFILE, or set [profiles] default)"
                    .to_string(),
            })
    }
}

//! Operation: check a profile against the machine it runs on.

use std::path::Path;

use archcfg_core::dependency::Dependency;
use archcfg_core::profile::BuildProfile;
use archcfg_core::variant::{Language, Variant};
use archcfg_util::process::probe_version;

/// Result of running `<compiler> --version`.
#[derive(Debug, Clone)]
pub struct CompilerProbe {
    pub language: Language,
    pub command: String,
    /// First line of the version banner, or `None` if the probe failed.
    pub version: Option<String>,
}

/// Whether a dependency's recorded path exists.
#[derive(Debug, Clone)]
pub struct PathProbe {
    pub dependency: Dependency,
    pub path: String,
    pub exists: bool,
}

#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub profile: String,
    pub variant: Variant,
    pub compilers: Vec<CompilerProbe>,
    /// Languages with no compiler for this variant.
    pub unresolved: Vec<Language>,
    pub paths: Vec<PathProbe>,
}

impl Diagnosis {
    pub fn is_healthy(&self) -> bool {
        self.compilers.iter().all(|c| c.version.is_some()) && self.paths.iter().all(|p| p.exists)
    }
}

/// Probe every compiler `variant` uses and every available dependency path.
pub fn diagnose(profile: &BuildProfile, variant: Variant) -> Diagnosis {
    let mut compilers = Vec::new();
    let mut unresolved = Vec::new();
    for language in Language::ALL {
        match profile.compilers.resolve(language, variant) {
            Some(command) => {
                let version = probe_version(command);
                if version.is_none() {
                    tracing::debug!("probe of '{command}' failed");
                }
                compilers.push(CompilerProbe {
                    language,
                    command: command.to_string(),
                    version,
                });
            }
            None => unresolved.push(language),
        }
    }

    let paths = profile
        .dependency_paths
        .available()
        .map(|(dependency, path)| PathProbe {
            dependency,
            path: path.to_string(),
            exists: Path::new(path).exists(),
        })
        .collect();

    Diagnosis {
        profile: profile.name.clone(),
        variant,
        compilers,
        unresolved,
        paths,
    }
}

//! Consistency checks for resolved profiles.

use std::collections::BTreeSet;
use std::fmt;

use archcfg_util::errors::ArchError;

use crate::compiler::VariantValue;
use crate::dependency::Dependency;
use crate::profile::BuildProfile;
use crate::variant::{Language, Precision};

/// What the consuming build needs from a valid profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// Dependencies whose path must be non-empty when `is_valid` is set.
    pub required: BTreeSet<Dependency>,
    /// Treat warnings as errors.
    pub strict: bool,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            required: default_required(),
            strict: false,
        }
    }
}

/// The Charm++ runtime and HDF5 are needed by every build.
pub fn default_required() -> BTreeSet<Dependency> {
    [Dependency::Charm, Dependency::Hdf5].into_iter().collect()
}

/// One finding, attached to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub field: String,
    pub message: String,
}

impl Issue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of validating one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub profile: String,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into an error carrying every error message.
    pub fn into_result(self) -> Result<(), ArchError> {
        if self.is_ok() {
            return Ok(());
        }
        let details: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Err(ArchError::Validation {
            profile: self.profile,
            message: details.join("; "),
        })
    }
}

/// Check `profile` against `req`.
pub fn validate(profile: &BuildProfile, req: &Requirements) -> Report {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if profile.is_valid {
        for dep in &req.required {
            match profile.dependency_paths.declared(*dep) {
                None => errors.push(Issue::new(
                    format!("paths.{dep}"),
                    "required dependency has no path",
                )),
                Some(p) if p.trim().is_empty() => errors.push(Issue::new(
                    format!("paths.{dep}"),
                    "required dependency path is empty",
                )),
                Some(_) => {}
            }
        }
    } else {
        warnings.push(Issue::new("is_valid", "profile is marked unusable"));
    }

    for (language, missing) in profile.compilers.incomplete_languages() {
        let names: Vec<&str> = missing.iter().map(|v| v.as_str()).collect();
        warnings.push(Issue::new(
            format!("compilers.{language}"),
            format!("no entry for variant(s) {}", names.join(", ")),
        ));
    }

    for language in Language::ALL {
        if !profile.compilers.is_configured(language) {
            warnings.push(Issue::new(
                format!("compilers.{language}"),
                "no compiler configured",
            ));
        } else if profile.compilers.get(language).is_some_and(compiler_is_blank) {
            errors.push(Issue::new(
                format!("compilers.{language}"),
                "compiler name is empty",
            ));
        }
    }

    let declared: Vec<Precision> = Precision::ALL
        .into_iter()
        .filter(|p| profile.precision(*p).is_some())
        .collect();
    if declared.len() == 1 {
        warnings.push(Issue::new(
            "precision",
            format!("only {} precision flags are declared", declared[0]),
        ));
    }

    if req.strict {
        errors.append(&mut warnings);
    }

    Report {
        profile: profile.name.clone(),
        errors,
        warnings,
    }
}

fn compiler_is_blank(value: &VariantValue) -> bool {
    match value {
        VariantValue::Uniform(s) => s.trim().is_empty(),
        VariantValue::PerVariant(map) => map.iter().any(|(_, s)| s.trim().is_empty()),
    }
}

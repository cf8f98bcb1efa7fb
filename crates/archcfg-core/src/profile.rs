use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use archcfg_util::errors::ArchError;
use archcfg_util::hash::sha256_hex;

use crate::compiler::{CompilerSet, VariantValue};
use crate::dependency::{Dependency, DependencyPaths};
use crate::properties::{interpolate, Environment, InterpolationError};
use crate::store::Origin;
use crate::variant::{Language, Precision, Variant};

/// The on-disk shape of a profile (`<name>.toml`).
///
/// String values may still contain `${env:NAME}` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    #[serde(deserialize_with = "bool_or_int")]
    pub is_valid: bool,

    #[serde(default)]
    pub arch_flags: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_flags: Option<VariantValue>,

    #[serde(default)]
    pub compilers: CompilerSet,

    #[serde(default)]
    pub precision: PrecisionFlags,

    #[serde(default)]
    pub fortran: FortranRuntime,

    #[serde(default)]
    pub paths: DependencyPaths,
}

impl ProfileFile {
    /// Parse profile TOML. `profile` only labels the error.
    pub fn parse(profile: &str, content: &str) -> Result<Self, ArchError> {
        toml::from_str(content).map_err(|e| ArchError::Parse {
            profile: profile.to_string(),
            message: e.to_string().trim_end().to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, ArchError> {
        toml::to_string(self).map_err(|e| ArchError::Generic {
            message: format!("Failed to serialize profile: {e}"),
        })
    }
}

/// Libraries needed to link compiled Fortran objects, from `[fortran]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FortranRuntime {
    #[serde(default, deserialize_with = "string_or_list")]
    pub libdir: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub libs: Vec<String>,
}

/// Fortran default-width flags from `[precision]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrecisionFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double: Option<String>,
}

impl PrecisionFlags {
    pub fn get(&self, precision: Precision) -> Option<&str> {
        match precision {
            Precision::Single => self.single.as_deref(),
            Precision::Double => self.double.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.single.is_none() && self.double.is_none()
    }
}

fn bool_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(n) => Err(D::Error::custom(format!(
            "is_valid must be true/false or 1/0, got {n}"
        ))),
    }
}

fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let items = match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    };
    Ok(items.into_iter().filter(|s| !s.trim().is_empty()).collect())
}

/// A fully resolved build profile.
///
/// Every `${env:NAME}` reference has been expanded and compiler names are
/// trimmed. Profiles are never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProfile {
    pub name: String,
    pub origin: Origin,
    pub is_valid: bool,
    pub arch_flags: String,
    pub link_flags: Option<VariantValue>,
    pub compilers: CompilerSet,
    pub fortran_runtime_libdir: Vec<String>,
    pub fortran_runtime_libs: Vec<String>,
    pub dependency_paths: DependencyPaths,
    pub precision_flags: PrecisionFlags,
}

impl BuildProfile {
    /// Resolve a parsed file against `env`.
    ///
    /// The first unexpandable reference aborts resolution with an
    /// [`ArchError::UnsetVariable`] naming the field it appeared in.
    pub fn resolve(
        name: &str,
        origin: Origin,
        file: &ProfileFile,
        env: &Environment,
    ) -> Result<Self, ArchError> {
        let expand = |field: String, value: &str| -> Result<String, ArchError> {
            interpolate(value, env).map_err(|e| match e {
                InterpolationError::Unset(variable) => ArchError::UnsetVariable {
                    profile: name.to_string(),
                    field,
                    variable,
                },
                InterpolationError::Unterminated => ArchError::Parse {
                    profile: name.to_string(),
                    message: format!("{field}: {e}"),
                },
            })
        };
        let expand_list = |field: &str, values: &[String]| -> Result<Vec<String>, ArchError> {
            values
                .iter()
                .enumerate()
                .map(|(i, v)| expand(format!("{field}[{i}]"), v))
                .collect()
        };

        let arch_flags = expand("arch_flags".to_string(), &file.arch_flags)?;

        let link_flags = file
            .link_flags
            .as_ref()
            .map(|lf| {
                lf.try_map(|variant, s| {
                    let field = match variant {
                        Some(v) => format!("link_flags.{v}"),
                        None => "link_flags".to_string(),
                    };
                    expand(field, s).map(|s| s.trim().to_string())
                })
            })
            .transpose()?;

        let compilers = file
            .compilers
            .try_map(|field, s| expand(field, s).map(|s| s.trim().to_string()))?;

        let mut dependency_paths = DependencyPaths::default();
        for dep in Dependency::ALL {
            if let Some(raw) = file.paths.declared(dep) {
                let path = expand(format!("paths.{dep}"), raw)?;
                dependency_paths.set(dep, Some(path));
            }
        }

        let precision_flags = PrecisionFlags {
            single: file
                .precision
                .single
                .as_deref()
                .map(|s| expand("precision.single".to_string(), s))
                .transpose()?,
            double: file
                .precision
                .double
                .as_deref()
                .map(|s| expand("precision.double".to_string(), s))
                .transpose()?,
        };

        Ok(Self {
            name: name.to_string(),
            origin,
            is_valid: file.is_valid,
            arch_flags,
            link_flags,
            compilers,
            fortran_runtime_libdir: expand_list("fortran.libdir", &file.fortran.libdir)?,
            fortran_runtime_libs: expand_list("fortran.libs", &file.fortran.libs)?,
            dependency_paths,
            precision_flags,
        })
    }

    /// The compiler for `language` in `variant`.
    pub fn compiler(&self, language: Language, variant: Variant) -> Result<&str, ArchError> {
        self.compilers
            .resolve(language, variant)
            .ok_or_else(|| ArchError::Compiler {
                profile: self.name.clone(),
                message: if self.compilers.is_configured(language) {
                    format!("no {language} compiler is configured for the {variant} variant")
                } else {
                    format!("no {language} compiler is configured")
                },
            })
    }

    /// Every compiler that resolves for `variant`.
    pub fn compilers_for(&self, variant: Variant) -> BTreeMap<Language, &str> {
        Language::ALL
            .into_iter()
            .filter_map(|l| self.compilers.resolve(l, variant).map(|c| (l, c)))
            .collect()
    }

    pub fn link_flags_for(&self, variant: Variant) -> Option<&str> {
        self.link_flags
            .as_ref()
            .and_then(|lf| lf.resolve(variant))
            .filter(|s| !s.is_empty())
    }

    /// Path of an available dependency.
    pub fn dependency(&self, dep: Dependency) -> Option<&str> {
        self.dependency_paths.get(dep)
    }

    pub fn precision(&self, precision: Precision) -> Option<&str> {
        self.precision_flags.get(precision)
    }

    /// Variants this profile can build.
    ///
    /// Profiles whose compilers are all uniform serve every variant.
    pub fn variants(&self) -> BTreeSet<Variant> {
        let declared = self.compilers.declared_variants();
        if declared.is_empty() {
            Variant::ALL.into_iter().collect()
        } else {
            declared
        }
    }

    /// The resolved profile in file form.
    pub fn to_file(&self) -> ProfileFile {
        ProfileFile {
            is_valid: self.is_valid,
            arch_flags: self.arch_flags.clone(),
            link_flags: self.link_flags.clone(),
            compilers: self.compilers.clone(),
            precision: self.precision_flags.clone(),
            fortran: FortranRuntime {
                libdir: self.fortran_runtime_libdir.clone(),
                libs: self.fortran_runtime_libs.clone(),
            },
            paths: self.dependency_paths.clone(),
        }
    }

    /// SHA-256 over the canonical JSON of the resolved values.
    ///
    /// The name and origin are not part of the fingerprint, so a copied
    /// profile with identical settings hashes the same.
    pub fn fingerprint(&self) -> Result<String, ArchError> {
        let json = serde_json::to_vec(&self.to_file()).map_err(|e| ArchError::Generic {
            message: format!("Failed to serialize profile '{}': {e}", self.name),
        })?;
        Ok(sha256_hex(&json))
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::variant::{Language, Variant};

/// Per-variant values, e.g. `{ mpi = "mpicxx", serial = "pgCC" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charm: Option<String>,
}

impl PerVariant {
    pub fn get(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Serial => self.serial.as_deref(),
            Variant::Mpi => self.mpi.as_deref(),
            Variant::Charm => self.charm.as_deref(),
        }
    }

    pub fn set(&mut self, variant: Variant, value: impl Into<String>) {
        let slot = match variant {
            Variant::Serial => &mut self.serial,
            Variant::Mpi => &mut self.mpi,
            Variant::Charm => &mut self.charm,
        };
        *slot = Some(value.into());
    }

    /// Entries in variant order.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &str)> + '_ {
        Variant::ALL
            .into_iter()
            .filter_map(move |v| self.get(v).map(|s| (v, s)))
    }

    pub fn variants(&self) -> BTreeSet<Variant> {
        self.iter().map(|(v, _)| v).collect()
    }
}

/// A setting that is either shared by every variant or given per variant.
///
/// When a per-variant mapping is present it is authoritative: variants it
/// does not name have no value, even if another setting is uniform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantValue {
    Uniform(String),
    PerVariant(PerVariant),
}

impl VariantValue {
    pub fn resolve(&self, variant: Variant) -> Option<&str> {
        match self {
            VariantValue::Uniform(s) => Some(s.as_str()),
            VariantValue::PerVariant(map) => map.get(variant),
        }
    }

    /// Variants named explicitly. Empty for uniform values.
    pub fn declared_variants(&self) -> BTreeSet<Variant> {
        match self {
            VariantValue::Uniform(_) => BTreeSet::new(),
            VariantValue::PerVariant(map) => map.variants(),
        }
    }

    /// True for a per-variant mapping with no entries, which never resolves.
    pub fn is_empty(&self) -> bool {
        match self {
            VariantValue::Uniform(_) => false,
            VariantValue::PerVariant(map) => map.iter().next().is_none(),
        }
    }

    /// Rebuild the value by passing every string through `f`.
    ///
    /// `f` receives the variant the string belongs to (`None` for uniform).
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(Option<Variant>, &str) -> Result<String, E>,
    ) -> Result<Self, E> {
        match self {
            VariantValue::Uniform(s) => Ok(VariantValue::Uniform(f(None, s)?)),
            VariantValue::PerVariant(map) => {
                let mut out = PerVariant::default();
                for (variant, s) in map.iter() {
                    out.set(variant, f(Some(variant), s)?);
                }
                Ok(VariantValue::PerVariant(out))
            }
        }
    }
}

/// Compiler executables for the C, C++ and Fortran toolchains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<VariantValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cxx: Option<VariantValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f90: Option<VariantValue>,
}

impl CompilerSet {
    pub fn get(&self, language: Language) -> Option<&VariantValue> {
        match language {
            Language::Cc => self.cc.as_ref(),
            Language::Cxx => self.cxx.as_ref(),
            Language::F90 => self.f90.as_ref(),
        }
    }

    fn slot_mut(&mut self, language: Language) -> &mut Option<VariantValue> {
        match language {
            Language::Cc => &mut self.cc,
            Language::Cxx => &mut self.cxx,
            Language::F90 => &mut self.f90,
        }
    }

    pub fn set(&mut self, language: Language, value: VariantValue) {
        *self.slot_mut(language) = Some(value);
    }

    pub fn resolve(&self, language: Language, variant: Variant) -> Option<&str> {
        self.get(language).and_then(|v| v.resolve(variant))
    }

    /// Whether `language` has a compiler for at least one variant.
    ///
    /// An empty per-variant table (`cc = {}`) counts as not configured.
    pub fn is_configured(&self, language: Language) -> bool {
        self.get(language).is_some_and(|v| !v.is_empty())
    }

    /// Union of the variants named by any per-variant mapping.
    pub fn declared_variants(&self) -> BTreeSet<Variant> {
        Language::ALL
            .iter()
            .filter_map(|l| self.get(*l))
            .flat_map(|v| v.declared_variants())
            .collect()
    }

    /// Languages with a per-variant mapping that leaves out some declared variant.
    pub fn incomplete_languages(&self) -> Vec<(Language, BTreeSet<Variant>)> {
        let declared = self.declared_variants();
        Language::ALL
            .iter()
            .filter_map(|l| match self.get(*l) {
                Some(VariantValue::PerVariant(map)) if !map.variants().is_empty() => {
                    let missing: BTreeSet<Variant> =
                        declared.difference(&map.variants()).copied().collect();
                    (!missing.is_empty()).then_some((*l, missing))
                }
                _ => None,
            })
            .collect()
    }

    /// Apply `f` to every compiler string, tagging each with its field path.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(String, &str) -> Result<String, E>,
    ) -> Result<Self, E> {
        let mut out = CompilerSet::default();
        for language in Language::ALL {
            if let Some(value) = self.get(language) {
                let mapped = value.try_map(|variant, s| {
                    let field = match variant {
                        Some(v) => format!("compilers.{language}.{v}"),
                        None => format!("compilers.{language}"),
                    };
                    f(field, s)
                })?;
                out.set(language, mapped);
            }
        }
        Ok(out)
    }
}

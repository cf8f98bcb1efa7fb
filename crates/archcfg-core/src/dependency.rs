use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Third-party software whose install location a profile may record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    /// The Charm++ parallel runtime.
    Charm,
    Papi,
    Hdf5,
    Png,
    Grackle,
}

impl Dependency {
    pub const ALL: [Dependency; 5] = [
        Dependency::Charm,
        Dependency::Papi,
        Dependency::Hdf5,
        Dependency::Png,
        Dependency::Grackle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dependency::Charm => "charm",
            Dependency::Papi => "papi",
            Dependency::Hdf5 => "hdf5",
            Dependency::Png => "png",
            Dependency::Grackle => "grackle",
        }
    }

    /// Exported variable name, e.g. `HDF5_PATH`.
    pub fn env_var(&self) -> String {
        format!("{}_PATH", self.as_str().to_ascii_uppercase())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dependency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Dependency::ALL
            .into_iter()
            .find(|d| d.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "unknown dependency '{s}' (expected one of: charm, papi, hdf5, png, grackle)"
                )
            })
    }
}

/// Install locations from the `[paths]` table.
///
/// An absent key and an empty string both mean the dependency is not
/// available on this platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub papi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdf5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grackle: Option<String>,
}

impl DependencyPaths {
    /// The raw declared value, which may be empty.
    pub fn declared(&self, dep: Dependency) -> Option<&str> {
        match dep {
            Dependency::Charm => self.charm.as_deref(),
            Dependency::Papi => self.papi.as_deref(),
            Dependency::Hdf5 => self.hdf5.as_deref(),
            Dependency::Png => self.png.as_deref(),
            Dependency::Grackle => self.grackle.as_deref(),
        }
    }

    /// The path if the dependency is available.
    pub fn get(&self, dep: Dependency) -> Option<&str> {
        self.declared(dep).filter(|p| !p.trim().is_empty())
    }

    pub fn set(&mut self, dep: Dependency, path: Option<String>) {
        let slot = match dep {
            Dependency::Charm => &mut self.charm,
            Dependency::Papi => &mut self.papi,
            Dependency::Hdf5 => &mut self.hdf5,
            Dependency::Png => &mut self.png,
            Dependency::Grackle => &mut self.grackle,
        };
        *slot = path;
    }

    /// Available dependencies and their paths.
    pub fn available(&self) -> impl Iterator<Item = (Dependency, &str)> + '_ {
        Dependency::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|p| (d, p)))
    }
}

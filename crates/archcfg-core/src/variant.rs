use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A build mode that may need a different compiler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Serial,
    Mpi,
    Charm,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Serial, Variant::Mpi, Variant::Charm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Serial => "serial",
            Variant::Mpi => "mpi",
            Variant::Charm => "charm",
        }
    }
}

/// A compiler toolchain language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cc,
    Cxx,
    F90,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Cc, Language::Cxx, Language::F90];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cc => "cc",
            Language::Cxx => "cxx",
            Language::F90 => "f90",
        }
    }

    /// Conventional environment variable naming this language's compiler.
    pub fn env_var(&self) -> &'static str {
        match self {
            Language::Cc => "CC",
            Language::Cxx => "CXX",
            Language::F90 => "F90",
        }
    }
}

/// Default floating-point width for Fortran `real`/`double precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    pub const ALL: [Precision; 2] = [Precision::Single, Precision::Double];

    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Single => "single",
            Precision::Double => "double",
        }
    }
}

macro_rules! impl_name_traits {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| {
                        let names: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown {} '{s}' (expected one of: {})", $what, names.join(", "))
                    })
            }
        }
    };
}

impl_name_traits!(Variant, "variant");
impl_name_traits!(Language, "language");
impl_name_traits!(Precision, "precision");

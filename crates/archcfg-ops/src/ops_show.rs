//! Operation: render a resolved profile.

use std::str::FromStr;

use serde::Serialize;

use archcfg_core::profile::{BuildProfile, ProfileFile};
use archcfg_util::errors::ArchError;

/// Output format for `archcfg show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    Toml,
    Json,
}

impl FromStr for ShowFormat {
    type Err = ArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toml" => Ok(ShowFormat::Toml),
            "json" => Ok(ShowFormat::Json),
            other => Err(ArchError::Generic {
                message: format!("Unknown format '{other}' (expected toml or json)"),
            }),
        }
    }
}

#[derive(Serialize)]
struct ShowDocument<'a> {
    name: &'a str,
    origin: String,
    fingerprint: String,
    #[serde(flatten)]
    profile: ProfileFile,
}

/// The resolved profile as TOML (with a provenance header) or JSON.
pub fn render(profile: &BuildProfile, format: ShowFormat) -> miette::Result<String> {
    match format {
        ShowFormat::Toml => {
            let body = profile.to_file().to_toml()?;
            let fingerprint = profile.fingerprint()?;
            Ok(format!(
                "# profile:     {}\n# origin:      {}\n# fingerprint: {}\n\n{body}",
                profile.name,
                profile.origin,
                fingerprint
            ))
        }
        ShowFormat::Json => {
            let doc = ShowDocument {
                name: &profile.name,
                origin: profile.origin.to_string(),
                fingerprint: profile.fingerprint()?,
                profile: profile.to_file(),
            };
            serde_json::to_string_pretty(&doc).map_err(|e| {
                ArchError::Generic {
                    message: format!("Failed to serialize profile: {e}"),
                }
                .into()
            })
        }
    }
}

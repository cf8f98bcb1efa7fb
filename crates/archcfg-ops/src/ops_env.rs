//! Operation: export a profile as variable assignments for one variant.

use std::collections::BTreeMap;
use std::str::FromStr;

use archcfg_core::dependency::Dependency;
use archcfg_core::profile::BuildProfile;
use archcfg_core::variant::{Language, Precision, Variant};
use archcfg_util::errors::ArchError;

/// Output format for `archcfg env`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFormat {
    /// `export KEY='value'` lines.
    Sh,
    /// A flat JSON object.
    Json,
}

impl FromStr for EnvFormat {
    type Err = ArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sh" => Ok(EnvFormat::Sh),
            "json" => Ok(EnvFormat::Json),
            other => Err(ArchError::Generic {
                message: format!("Unknown format '{other}' (expected sh or json)"),
            }),
        }
    }
}

/// The variables exported for `variant`, in a stable order.
///
/// Languages with no compiler for `variant` are left out; when the
/// language is configured for other variants this is logged as a warning.
pub fn exports(
    profile: &BuildProfile,
    variant: Variant,
    precision: Option<Precision>,
) -> miette::Result<Vec<(String, String)>> {
    let mut vars: Vec<(String, String)> = Vec::new();
    vars.push(("ARCHCFG_PROFILE".into(), profile.name.clone()));
    vars.push(("ARCHCFG_VARIANT".into(), variant.to_string()));

    for language in Language::ALL {
        match profile.compiler(language, variant) {
            Ok(compiler) => vars.push((language.env_var().into(), compiler.to_string())),
            Err(e) if profile.compilers.is_configured(language) => {
                tracing::warn!("{e}");
            }
            Err(_) => {}
        }
    }

    vars.push(("ARCH_FLAGS".into(), profile.arch_flags.clone()));
    vars.push((
        "LINK_FLAGS".into(),
        profile.link_flags_for(variant).unwrap_or_default().to_string(),
    ));

    if let Some(precision) = precision {
        let flags = profile
            .precision(precision)
            .ok_or_else(|| ArchError::MissingSetting {
                profile: profile.name.clone(),
                field: format!("precision.{precision}"),
            })?;
        vars.push(("PREC_FLAGS".into(), flags.to_string()));
    }

    vars.push((
        "FORTRAN_LIBDIRS".into(),
        profile.fortran_runtime_libdir.join(" "),
    ));
    vars.push(("FORTRAN_LIBS".into(), profile.fortran_runtime_libs.join(" ")));

    for dep in Dependency::ALL {
        if let Some(path) = profile.dependency(dep) {
            vars.push((dep.env_var(), path.to_string()));
        }
    }

    Ok(vars)
}

/// Render [`exports`] in `format`.
pub fn render(
    profile: &BuildProfile,
    variant: Variant,
    precision: Option<Precision>,
    format: EnvFormat,
) -> miette::Result<String> {
    let vars = exports(profile, variant, precision)?;
    match format {
        EnvFormat::Sh => Ok(vars
            .iter()
            .map(|(k, v)| format!("export {k}={}\n", shell_quote(v)))
            .collect()),
        EnvFormat::Json => {
            let map: BTreeMap<&str, &str> =
                vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            serde_json::to_string_pretty(&map).map_err(|e| {
                ArchError::Generic {
                    message: format!("Failed to serialize exports: {e}"),
                }
                .into()
            })
        }
    }
}

/// Single-quote `value` for POSIX shells.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

use miette::Result;

use archcfg_core::variant::Variant;
use archcfg_ops::ops_doctor::diagnose;
use archcfg_ops::Context;
use archcfg_util::errors::ArchError;
use archcfg_util::hash::short;
use archcfg_util::progress::{status, status_error, status_info, status_warn};

pub fn exec(ctx: &Context, name: Option<&str>, variant: Variant) -> Result<()> {
    let profile = ctx.load(name)?;
    let fingerprint = profile.fingerprint()?;
    status_info(
        "Diagnosing",
        &format!(
            "{} ({variant}, {}) from {}",
            profile.name,
            short(&fingerprint, 12),
            profile.origin
        ),
    );

    let diagnosis = diagnose(&profile, variant);
    for probe in &diagnosis.compilers {
        match &probe.version {
            Some(version) => status(
                "Found",
                &format!("{} `{}`: {version}", probe.language, probe.command),
            ),
            None => status_error(
                "Missing",
                &format!("{} `{}` did not run", probe.language, probe.command),
            ),
        }
    }
    for language in &diagnosis.unresolved {
        status_warn("Skipped", &format!("{language}: no compiler for {variant}"));
    }
    for probe in &diagnosis.paths {
        if probe.exists {
            status("Found", &format!("{} at {}", probe.dependency, probe.path));
        } else {
            status_error("Missing", &format!("{} at {}", probe.dependency, probe.path));
        }
    }

    if !diagnosis.is_healthy() {
        return Err(ArchError::Generic {
            message: format!(
                "Profile '{}' is not usable here ({variant} variant)",
                diagnosis.profile
            ),
        }
        .into());
    }
    Ok(())
}

//! Operation: validate one or more profiles.

use archcfg_core::validate::{validate, Report, Requirements};
use archcfg_util::errors::ArchError;

use crate::Context;

/// Which profiles to check.
pub enum CheckTarget<'a> {
    /// The named profiles, or the default profile when empty.
    Named(&'a [String]),
    /// Every profile on the search path.
    All,
}

/// Outcome for a single profile.
pub enum CheckOutcome {
    /// The profile loaded; see the report for findings.
    Checked(Report),
    /// The profile could not be loaded at all.
    LoadFailed { name: String, error: ArchError },
}

impl CheckOutcome {
    pub fn name(&self) -> &str {
        match self {
            CheckOutcome::Checked(r) => &r.profile,
            CheckOutcome::LoadFailed { name, .. } => name,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CheckOutcome::Checked(r) if r.is_ok())
    }
}

/// Validate profiles against `req`, falling back to the configured requirements.
///
/// Load failures are collected rather than returned so one broken profile
/// does not hide the results for the others.
pub fn check(
    ctx: &Context,
    target: CheckTarget<'_>,
    req: Option<&Requirements>,
) -> miette::Result<Vec<CheckOutcome>> {
    let req = req.unwrap_or(&ctx.config.requirements);
    let store = ctx.store();

    let loaded = match target {
        CheckTarget::All => store.load_all(&ctx.env)?,
        CheckTarget::Named([]) => {
            let name = ctx.config.profile_name(None)?;
            let result = store.load(&name, &ctx.env);
            vec![(name, result)]
        }
        CheckTarget::Named(names) => names
            .iter()
            .map(|name| (name.clone(), store.load(name, &ctx.env)))
            .collect(),
    };

    Ok(loaded
        .into_iter()
        .map(|(name, result)| match result {
            Ok(profile) => CheckOutcome::Checked(validate(&profile, req)),
            Err(error) => {
                tracing::debug!("failed to load '{name}': {error}");
                CheckOutcome::LoadFailed { name, error }
            }
        })
        .collect())
}

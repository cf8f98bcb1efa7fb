use miette::Result;

use archcfg_core::dependency::Dependency;
use archcfg_ops::ops_check::{check, CheckOutcome, CheckTarget};
use archcfg_ops::Context;
use archcfg_util::errors::ArchError;
use archcfg_util::progress::{status, status_error, status_warn};

pub fn exec(
    ctx: &Context,
    names: &[String],
    all: bool,
    strict: bool,
    require: Option<Vec<Dependency>>,
) -> Result<()> {
    let mut req = ctx.config.requirements.clone();
    req.strict |= strict;
    if let Some(deps) = require {
        req.required = deps.into_iter().collect();
    }

    let target = if all {
        CheckTarget::All
    } else {
        CheckTarget::Named(names)
    };
    let outcomes = check(ctx, target, Some(&req))?;

    let mut failed = 0;
    for outcome in &outcomes {
        match outcome {
            CheckOutcome::Checked(report) => {
                for issue in &report.warnings {
                    status_warn("warning", &format!("{}: {issue}", report.profile));
                }
                for issue in &report.errors {
                    status_error("error", &format!("{}: {issue}", report.profile));
                }
                if report.is_ok() {
                    status("Checked", &report.profile);
                } else {
                    status_error("Failed", &report.profile);
                }
            }
            CheckOutcome::LoadFailed { name, error } => {
                status_error("Failed", &format!("{name}: {error}"));
            }
        }
        if !outcome.is_ok() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(ArchError::Generic {
            message: format!("{failed} of {} profile(s) failed validation", outcomes.len()),
        }
        .into());
    }
    Ok(())
}

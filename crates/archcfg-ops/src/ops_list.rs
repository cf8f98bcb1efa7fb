//! Operation: list visible profiles.

use globset::Glob;

use archcfg_core::store::ProfileEntry;
use archcfg_util::errors::ArchError;

use crate::Context;

/// Profiles on the search path, optionally filtered by a glob such as `linux_*`.
pub fn list(ctx: &Context, pattern: Option<&str>) -> miette::Result<Vec<ProfileEntry>> {
    let entries = ctx.store().list()?;
    let Some(pattern) = pattern else {
        return Ok(entries);
    };
    let matcher = Glob::new(pattern)
        .map_err(|e| ArchError::Generic {
            message: format!("Invalid pattern '{pattern}': {e}"),
        })?
        .compile_matcher();
    Ok(entries
        .into_iter()
        .filter(|e| matcher.is_match(&e.name))
        .collect())
}

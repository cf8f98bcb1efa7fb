//! Operation: scaffold a new profile file.

use std::path::{Path, PathBuf};

use archcfg_core::store::validate_name;
use archcfg_core::template::{render_blank, render_from};
use archcfg_core::PROFILE_EXTENSION;
use archcfg_util::errors::ArchError;
use archcfg_util::fs::ensure_dir;

use crate::Context;

/// Options for `archcfg new`.
pub struct NewOptions<'a> {
    pub name: &'a str,
    /// Copy an existing profile instead of the blank template.
    pub from: Option<&'a str>,
    /// Target directory; defaults to the first configured profile directory.
    pub dir: Option<&'a Path>,
}

/// Write `<dir>/<name>.toml` and return its path. Never overwrites.
pub fn new_profile(ctx: &Context, opts: &NewOptions<'_>) -> miette::Result<PathBuf> {
    validate_name(opts.name)?;

    let dir = match opts.dir {
        Some(d) => d.to_path_buf(),
        None => ctx.config.dirs.first().cloned().ok_or_else(|| ArchError::Config {
            message: "No profile directory configured; pass --dir or add [profiles] paths"
                .to_string(),
        })?,
    };

    let path = dir.join(format!("{}.{PROFILE_EXTENSION}", opts.name));
    if path.exists() {
        return Err(ArchError::Generic {
            message: format!("{} already exists", path.display()),
        }
        .into());
    }

    let content = match opts.from {
        Some(base) => render_from(&ctx.store().source(base)?, opts.name)?,
        None => render_blank(opts.name),
    };

    ensure_dir(&dir).map_err(ArchError::Io)?;
    std::fs::write(&path, content).map_err(ArchError::Io)?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

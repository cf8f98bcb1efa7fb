//! Operation: edit one value in a profile file, preserving formatting.

use std::path::PathBuf;

use toml_edit::{DocumentMut, Item, Table, TableLike, Value};

use archcfg_core::profile::ProfileFile;
use archcfg_core::store::Origin;
use archcfg_util::errors::ArchError;

use crate::Context;

/// Options for `archcfg set`.
pub struct SetOptions<'a> {
    pub profile: &'a str,
    /// Dotted key, e.g. `paths.hdf5` or `compilers.cxx.mpi`.
    pub key: &'a str,
    /// New value; `None` removes the key.
    pub value: Option<&'a str>,
}

/// Apply the edit and return the path of the modified file.
///
/// The edited document must still be a valid profile; otherwise nothing
/// is written.
pub fn set_value(ctx: &Context, opts: &SetOptions<'_>) -> miette::Result<PathBuf> {
    let source = ctx.store().source(opts.profile)?;
    let path = match source.origin {
        Origin::File(p) => p,
        Origin::Builtin => {
            return Err(ArchError::Generic {
                message: format!(
                    "'{}' is a built-in profile and cannot be edited; \
                     copy it first with `archcfg new <name> --from {}`",
                    opts.profile, opts.profile
                ),
            }
            .into())
        }
    };

    let mut doc: DocumentMut = source.text.parse().map_err(|e| ArchError::Parse {
        profile: opts.profile.to_string(),
        message: format!("{e}"),
    })?;

    let parts: Vec<&str> = opts.key.split('.').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(ArchError::Generic {
            message: format!("Invalid key '{}'", opts.key),
        }
        .into());
    }
    let (last, parents) = parts.split_last().ok_or_else(|| ArchError::Generic {
        message: "Empty key".to_string(),
    })?;

    let table = descend(doc.as_table_mut(), parents, opts.value.is_some())?;
    match (table, opts.value) {
        (Some(table), Some(raw)) => {
            table.insert(last, Item::Value(parse_value(raw)));
        }
        (Some(table), None) => {
            if table.remove(last).is_none() {
                tracing::warn!("key '{}' was not set", opts.key);
            }
        }
        (None, _) => tracing::warn!("key '{}' was not set", opts.key),
    }

    let updated = doc.to_string();
    ProfileFile::parse(opts.profile, &updated)?;
    std::fs::write(&path, updated).map_err(ArchError::Io)?;
    Ok(path)
}

/// Walk `keys` from `root`, creating missing tables when `create` is set.
///
/// Returns `None` if a table is missing and `create` is false.
fn descend<'a>(
    root: &'a mut Table,
    keys: &[&str],
    create: bool,
) -> miette::Result<Option<&'a mut dyn TableLike>> {
    let mut current: &mut dyn TableLike = root;
    for (depth, key) in keys.iter().enumerate() {
        if !current.contains_key(key) {
            if !create {
                return Ok(None);
            }
            current.insert(key, Item::Table(Table::new()));
        }
        current = current
            .get_mut(key)
            .and_then(Item::as_table_like_mut)
            .ok_or_else(|| ArchError::Generic {
                message: format!("'{}' is not a table", keys[..=depth].join(".")),
            })?;
    }
    Ok(Some(current))
}

/// Interpret `raw` as a TOML value (`1`, `true`, `["a"]`, `{ mpi = "x" }`),
/// falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    match raw.parse::<Value>() {
        Ok(mut v) => {
            v.decor_mut().clear();
            v
        }
        Err(_) => Value::from(raw),
    }
}

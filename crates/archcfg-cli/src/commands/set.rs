use miette::Result;

use archcfg_ops::ops_set::{set_value, SetOptions};
use archcfg_ops::Context;
use archcfg_util::progress::status;

pub fn exec(ctx: &Context, profile: &str, key: &str, value: Option<&str>) -> Result<()> {
    let path = set_value(ctx, &SetOptions { profile, key, value })?;
    let verb = if value.is_some() { "Updated" } else { "Removed" };
    status(verb, &format!("{key} in {}", path.display()));
    Ok(())
}

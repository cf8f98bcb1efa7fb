use miette::Result;
use std::path::Path;

use archcfg_ops::ops_new::{new_profile, NewOptions};
use archcfg_ops::Context;
use archcfg_util::progress::status;

pub fn exec(ctx: &Context, name: &str, from: Option<&str>, dir: Option<&Path>) -> Result<()> {
    let path = new_profile(ctx, &NewOptions { name, from, dir })?;
    status("Created", &format!("profile '{name}' at {}", path.display()));
    if from.is_none() {
        println!("Edit the file, set is_valid = 1, then run `archcfg check {name}`.");
    }
    Ok(())
}

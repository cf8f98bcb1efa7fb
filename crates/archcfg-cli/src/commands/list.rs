use miette::Result;

use archcfg_ops::Context;
use archcfg_util::progress::status_warn;

pub fn exec(ctx: &Context, pattern: Option<&str>) -> Result<()> {
    let entries = archcfg_ops::ops_list::list(ctx, pattern)?;
    if entries.is_empty() {
        status_warn("Empty", "no profiles found");
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        println!("{:<width$}  {}", entry.name, entry.origin);
    }
    Ok(())
}

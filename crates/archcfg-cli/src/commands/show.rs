use miette::Result;

use archcfg_ops::ops_show::{render, ShowFormat};
use archcfg_ops::Context;

pub fn exec(ctx: &Context, name: Option<&str>, format: ShowFormat) -> Result<()> {
    let profile = ctx.load(name)?;
    let text = render(&profile, format)?;
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
    Ok(())
}

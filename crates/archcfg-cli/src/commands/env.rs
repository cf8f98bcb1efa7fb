use miette::Result;

use archcfg_core::variant::{Precision, Variant};
use archcfg_ops::ops_env::{render, EnvFormat};
use archcfg_ops::Context;

pub fn exec(
    ctx: &Context,
    name: Option<&str>,
    variant: Variant,
    precision: Option<Precision>,
    format: EnvFormat,
) -> Result<()> {
    let profile = ctx.load(name)?;
    let text = render(&profile, variant, precision, format)?;
    match format {
        EnvFormat::Sh => print!("{text}"),
        EnvFormat::Json => println!("{text}"),
    }
    Ok(())
}

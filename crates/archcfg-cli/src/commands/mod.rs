//! Command dispatch and handler modules.

mod check;
mod doctor;
mod env;
mod list;
mod new;
mod set;
mod show;

use miette::Result;

use archcfg_core::config::Overrides;
use archcfg_core::properties::Environment;
use archcfg_ops::Context;
use archcfg_util::errors::ArchError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        profile_dirs: cli.profile_dirs,
        profile: cli.profile,
        require: None,
        strict: false,
        no_builtin: cli.no_builtin,
    };
    let cwd = std::env::current_dir().map_err(ArchError::Io)?;
    let ctx = Context::new(
        &overrides,
        &cwd,
        Environment::from_process(),
        cli.home.as_deref(),
    )?;

    match cli.command {
        Command::List { pattern } => list::exec(&ctx, pattern.as_deref()),
        Command::Show { name, format } => show::exec(&ctx, name.as_deref(), format),
        Command::Check {
            names,
            all,
            strict,
            require,
        } => check::exec(&ctx, &names, all, strict, require),
        Command::Env {
            name,
            variant,
            precision,
            format,
        } => env::exec(&ctx, name.as_deref(), variant, precision, format),
        Command::New { name, from, dir } => new::exec(&ctx, &name, from.as_deref(), dir.as_deref()),
        Command::Set {
            name,
            key,
            value,
            unset,
        } => set::exec(&ctx, &name, &key, if unset { None } else { value.as_deref() }),
        Command::Doctor { name, variant } => doctor::exec(&ctx, name.as_deref(), variant),
    }
}

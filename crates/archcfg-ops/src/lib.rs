//! Operations wiring the archcfg commands to the core profile types.
//!
//! Each `ops_*` module returns plain data; printing is left to the CLI.

pub mod ops_check;
pub mod ops_doctor;
pub mod ops_env;
pub mod ops_list;
pub mod ops_new;
pub mod ops_set;
pub mod ops_show;

use std::path::Path;

use archcfg_core::config::{Overrides, ResolvedConfig};
use archcfg_core::profile::BuildProfile;
use archcfg_core::properties::Environment;
use archcfg_core::store::ProfileStore;

/// Everything an operation needs: effective configuration plus the
/// environment profiles are resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ResolvedConfig,
    pub env: Environment,
}

impl Context {
    /// Layer configuration for `cwd`.
    ///
    /// `home`, when given, replaces `HOME` in `env`.
    pub fn new(
        overrides: &Overrides,
        cwd: &Path,
        env: Environment,
        home: Option<&str>,
    ) -> miette::Result<Self> {
        let env = match home {
            Some(h) => env.with_home(h),
            None => env,
        };
        let config = ResolvedConfig::resolve(overrides, cwd, &env)?;
        tracing::debug!("profile search path: {:?}", config.dirs);
        Ok(Self { config, env })
    }

    pub fn store(&self) -> ProfileStore {
        self.config.store()
    }

    /// Load `name`, or the configured default profile.
    pub fn load(&self, name: Option<&str>) -> miette::Result<BuildProfile> {
        let name = self.config.profile_name(name)?;
        Ok(self.store().load(&name, &self.env)?)
    }
}

use std::collections::BTreeMap;
use std::process::{Command, Output, Stdio};

use crate::errors::ArchError;

/// Builder for running an external tool such as a compiler driver.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Run the command to completion with stdin closed and capture its output.
    pub fn exec(&self) -> Result<Output, ArchError> {
        tracing::debug!("exec: {} {}", self.program, self.args.join(" "));
        Command::new(&self.program)
            .args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::null())
            .output()
            .map_err(ArchError::from)
    }
}

/// Ask a compiler driver for its version banner, in the C locale.
///
/// Command strings may carry leading wrapper words (`ccache gcc`); they are
/// split on whitespace. Returns the first non-empty line of stdout (or
/// stderr, where some drivers print it), or `None` if the program cannot be
/// started or exits unsuccessfully.
pub fn probe_version(command: &str) -> Option<String> {
    let mut words = command.split_whitespace();
    let program = words.next()?;
    let output = CommandBuilder::new(program)
        .args(words)
        .arg("--version")
        .env("LC_ALL", "C")
        .exec()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    first_line(&output.stdout).or_else(|| first_line(&output.stderr))
}

fn first_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

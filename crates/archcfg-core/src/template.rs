//! Scaffolding for new profile files (`archcfg new`).
//!
//! The blank template is embedded via `include_str!`. `{{variable}}`
//! placeholders are replaced at render time.

use std::collections::BTreeMap;

use archcfg_util::errors::ArchError;

use crate::profile::ProfileFile;
use crate::store::ProfileSource;

const BLANK_TEMPLATE: &str = include_str!("../templates/profile.toml");

/// Variables available to `{{variable}}` placeholders.
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new(profile_name: &str) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("profile_name".to_string(), profile_name.to_string());
        Self { vars }
    }
}

/// Replace all `{{key}}` placeholders in `input` with values from `ctx`.
/// Unknown placeholders are left untouched.
pub fn interpolate(input: &str, ctx: &TemplateContext) -> String {
    let mut result = input.to_string();
    for (key, value) in &ctx.vars {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// A fresh profile with placeholder values, marked not yet valid.
pub fn render_blank(name: &str) -> String {
    interpolate(BLANK_TEMPLATE, &TemplateContext::new(name))
}

/// A copy of `base` for a new profile called `name`.
///
/// The base's leading comment block is replaced by a header naming the
/// new profile and where it came from; everything else, including
/// `${env:...}` references, is kept verbatim.
pub fn render_from(base: &ProfileSource, name: &str) -> Result<String, ArchError> {
    ProfileFile::parse(&base.name, &base.text)?;

    let body: String = base
        .text
        .lines()
        .skip_while(|l| l.trim_start().starts_with('#') || l.trim().is_empty())
        .map(|l| format!("{l}\n"))
        .collect();

    Ok(format!(
        "# Build profile `{name}`, copied from `{}` ({}).\n\n{body}",
        base.name, base.origin
    ))
}

use std::io::Write;

use console::Style;

fn line(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.apply_to(label),
    );
}

/// Print a Cargo-style status line: `     Checked linux_gnu`
///
/// The `label` is right-aligned to 12 characters in bold green.
pub fn status(label: &str, message: &str) {
    line(Style::new().green().bold(), label, message);
}

/// Like [`status`] but bold cyan, for informational lines.
pub fn status_info(label: &str, message: &str) {
    line(Style::new().cyan().bold(), label, message);
}

/// Bold yellow label.
pub fn status_warn(label: &str, message: &str) {
    line(Style::new().yellow().bold(), label, message);
}

/// Bold red label.
pub fn status_error(label: &str, message: &str) {
    line(Style::new().red().bold(), label, message);
}

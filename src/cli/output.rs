//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, keys, hints

use console::style;

/// Print a success message with checkmark (green).
///
/// Example: `✓ published 4 parameters`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ secrets must be a valid JSON object`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ dry-run: skipping puts`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message (cyan).
pub fn hint(msg: &str) {
    println!("{} {}", style("→").cyan(), style(msg).cyan());
}

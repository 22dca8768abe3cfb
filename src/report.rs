//! Text rendering of archive listings and diffs.

use std::fmt::Write;

use owo_colors::OwoColorize;

use crate::diff::{ArchiveDiff, Change};
use crate::wad::Wad3Archive;

/// Style configuration for output formatting
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    pub use_color: bool,
}

impl OutputStyle {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn added(&self, text: &str) -> String {
        if self.use_color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn removed(&self, text: &str) -> String {
        if self.use_color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn modified(&self, text: &str) -> String {
        if self.use_color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.use_color {
            text.bold().green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.use_color {
            text.bold().red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn muted(&self, text: &str) -> String {
        if self.use_color {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Render the side-by-side diff report.
///
/// Only names that differ are listed, each row showing how the name looks
/// from the reference (left) and the compared archive (right).
pub fn render_report(
    diff: &ArchiveDiff,
    reference: &Wad3Archive,
    compare: &Wad3Archive,
    labels: (&str, &str),
    style: &OutputStyle,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:19}| {}", labels.0, labels.1);
    let _ = writeln!(out, "___________________|___________________");

    for (name, change) in diff.iter() {
        match change {
            Change::Added => {
                let _ = writeln!(
                    out,
                    "{}| {}",
                    style.removed(&format!("- {name:<17}")),
                    style.added(&format!("+ {name}"))
                );
            }
            Change::Removed => {
                let _ = writeln!(
                    out,
                    "{}| {}",
                    style.added(&format!("+ {name:<17}")),
                    style.removed(&format!("- {name}"))
                );
            }
            Change::Modified => {
                // Modified names are present in both archives
                let (left, right) = (&reference.entries()[name], &compare.entries()[name]);
                let _ = writeln!(
                    out,
                    "{}| {} {}",
                    style.modified(&format!("! {name:<17}")),
                    style.modified(&format!("! {name:<17}")),
                    style.muted(&format!(
                        "({}x{}, {} bytes - {}x{}, {} bytes)",
                        left.width,
                        left.height,
                        left.disk_size,
                        right.width,
                        right.height,
                        right.disk_size
                    ))
                );
            }
            Change::Unchanged => {}
        }
    }

    let _ = writeln!(
        out,
        "\n{} added, {} removed, {} modified, {} unchanged",
        diff.count(Change::Added),
        diff.count(Change::Removed),
        diff.count(Change::Modified),
        diff.count(Change::Unchanged)
    );

    out
}

/// Render a table of every entry in one archive.
pub fn render_listing(archive: &Wad3Archive) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<7} {:>10}  {:>11}  {:<32}  Name",
        "Type", "Size", "Dimensions", "Fingerprint"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));

    let mut total_size = 0i64;
    for (name, entry) in archive.iter() {
        let _ = writeln!(
            out,
            "{:<7} {:>10}  {:>11}  {}  {}",
            entry.entry_type().label(),
            entry.disk_size,
            format!("{}x{}", entry.width, entry.height),
            entry.fingerprint,
            name
        );
        total_size += i64::from(entry.disk_size);
    }

    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = writeln!(out, "{:<7} {:>10}  {} entries", "", total_size, archive.len());

    out
}

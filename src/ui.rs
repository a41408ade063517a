use anyhow::Result;
use console::style;
use std::io::{self, Write};

use crate::domain::ReleaseNotes;

/// Prints `Error: {message}` to stderr, in red when stderr is a terminal
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().for_stderr(), message);
}

/// Writes the release JSON envelope to stdout
pub fn display_release(notes: &ReleaseNotes) -> Result<()> {
    let json = notes.to_json()?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}

/// One-line human summary on stderr, e.g. `→ 1.2.0 (minor, 3 commits)`
pub fn display_summary(notes: &ReleaseNotes) {
    eprintln!(
        "{} {} ({}, {} commits)",
        style("→").yellow().for_stderr(),
        style(&notes.version).green().bold().for_stderr(),
        notes.bump_type,
        notes.commits.len()
    );
}

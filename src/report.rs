//! Human-readable run summary
//!
//! Printed to stdout at the end of a run. Not a stable format; scripts
//! should rely on the exit status.

use std::fmt;
use std::path::PathBuf;

use crate::key::{KeyFormat, KeyText};
use crate::materialize::Materialized;

/// Longest first/last line we echo back before shortening it
const MAX_PREVIEW: usize = 72;

/// What happened during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub format: KeyFormat,
    /// A base64 layer was removed from the input
    pub unwrapped: bool,
    pub line_count: usize,
    pub first_line: String,
    pub last_line: String,
    pub key_path: PathBuf,
    pub config_path: PathBuf,
    pub backups: Vec<PathBuf>,
}

/// Build the summary for a finished run
pub fn report(format: KeyFormat, text: &KeyText, written: &Materialized) -> Summary {
    Summary {
        format,
        unwrapped: false,
        line_count: text.line_count(),
        first_line: preview(text.first_line().unwrap_or("")),
        last_line: preview(text.last_line().unwrap_or("")),
        key_path: written.key_path.clone(),
        config_path: written.config_path.clone(),
        backups: written.backups.clone(),
    }
}

impl Summary {
    /// Record whether the decoder removed a base64 layer
    pub fn with_unwrapped(mut self, unwrapped: bool) -> Self {
        self.unwrapped = unwrapped;
        self
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unwrapped {
            writeln!(f, "🔓 Decoded base64-wrapped input")?;
        }
        if self.format.is_recognized() {
            writeln!(f, "🔑 Detected format: {}", self.format)?;
        } else {
            writeln!(
                f,
                "⚠️  Detected format: {} (written anyway)",
                self.format
            )?;
        }
        writeln!(f, "   Lines: {}", self.line_count)?;
        writeln!(f, "   First line: {}", self.first_line)?;
        writeln!(f, "   Last line:  {}", self.last_line)?;
        for backup in &self.backups {
            writeln!(f, "💾 Backup saved to {}", backup.display())?;
        }
        writeln!(f, "✅ Private key written to {}", self.key_path.display())?;
        write!(f, "✅ SSH config written to {}", self.config_path.display())
    }
}

fn preview(line: &str) -> String {
    if line.chars().count() <= MAX_PREVIEW {
        return line.to_string();
    }
    let head: String = line.chars().take(MAX_PREVIEW).collect();
    format!("{}…", head)
}

//! Credential presence report.

use crate::mask::mask_secret;
use crate::snapshot::EnvSnapshot;
use crate::Config;
use std::io::{self, Write};

/// Header printed at the top of every report
pub const HEADER: &str = "Testing Environment Variables:";

/// Width of the `=` separator lines
pub const SEPARATOR_WIDTH: usize = 60;

/// Closing note block
pub const NOTE: &str = "NOTE: OpenRouter API keys start with 'sk-or-v1-'\n\
                        If your key doesn't look right, please check your .env file";

/// Write a single presence line for `variable_name`.
///
/// Absent or empty values produce a `NOT SET` line. Sensitive values are
/// masked, everything else is printed as-is.
pub fn check_and_report<W: Write>(
    out: &mut W,
    snapshot: &EnvSnapshot,
    variable_name: &str,
    is_sensitive: bool,
) -> io::Result<()> {
    match snapshot.get(variable_name) {
        Some(value) if is_sensitive => {
            writeln!(out, "✅ {}: {}", variable_name, mask_secret(value))
        }
        Some(value) => writeln!(out, "✅ {}: {}", variable_name, value),
        None => writeln!(out, "❌ {}: NOT SET", variable_name),
    }
}

/// Reports on the API key (masked) and API base URL (shown in full)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    pub key_var: String,
    pub base_var: String,
}

impl Reporter {
    pub fn new(key_var: impl Into<String>, base_var: impl Into<String>) -> Self {
        Self {
            key_var: key_var.into(),
            base_var: base_var.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.key_var(), config.base_var())
    }

    /// Write the full report
    pub fn write_report<W: Write>(&self, out: &mut W, snapshot: &EnvSnapshot) -> io::Result<()> {
        let separator = "=".repeat(SEPARATOR_WIDTH);

        writeln!(out, "{}", HEADER)?;
        writeln!(out, "{}", separator)?;

        check_and_report(out, snapshot, &self.key_var, true)?;
        check_and_report(out, snapshot, &self.base_var, false)?;

        writeln!(out)?;
        writeln!(out, "{}", separator)?;
        writeln!(out)?;
        writeln!(out, "{}", NOTE)?;

        Ok(())
    }

    /// Render the report into a string
    pub fn render(&self, snapshot: &EnvSnapshot) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_report(&mut buf, snapshot)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

//! Environment snapshot and `.env` loading.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the loaded variables came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    /// A `.env` file was found and loaded
    File(PathBuf),
    /// No `.env` file was found; the process environment is used as-is
    NotFound,
    /// The file was loaded but some entries could not be parsed
    Malformed(PathBuf),
}

/// Read-only view of the environment taken once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Build a snapshot from explicit name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Capture the current process environment
    pub fn from_process() -> Self {
        let mut vars = HashMap::new();

        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (Ok(key), Err(_)) => debug!("Skipping {} (value is not valid UTF-8)", key),
                (Err(_), _) => debug!("Skipping variable with non UTF-8 name"),
            }
        }

        Self { vars }
    }

    /// Look up a variable. Empty values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Add file values for names the process does not already define
    fn fill_missing(&mut self, file_vars: HashMap<String, String>) {
        for (key, value) in file_vars {
            self.vars.entry(key).or_insert(value);
        }
    }
}

/// Variables read from an env file, not yet applied to anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    pub source: EnvSource,
    pub vars: HashMap<String, String>,
}

/// Find `.env` in the current directory or its nearest ancestor
fn find_env_file() -> Result<Option<PathBuf>> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd
        .ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file()))
}

/// Read a `.env` file without touching the process environment.
///
/// With no path, `.env` is searched for in the current directory and its
/// ancestors. A missing file is not an error. Lines that cannot be parsed are
/// skipped with a warning naming only the file and position, and later lines
/// are still read. When a name appears twice the last value wins.
pub fn load_env_file(path: Option<&Path>) -> Result<EnvFile> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match find_env_file()? {
            Some(found) => found,
            None => {
                debug!("No .env file found");
                return Ok(EnvFile {
                    source: EnvSource::NotFound,
                    vars: HashMap::new(),
                });
            }
        },
    };

    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            debug!("No env file at {}", path.display());
            return Ok(EnvFile {
                source: EnvSource::NotFound,
                vars: HashMap::new(),
            });
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to load env file: {}", path.display()));
        }
    };

    let mut vars = HashMap::new();
    let mut skipped = 0usize;

    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            // The unparsed text may hold secrets, so only the position is logged
            Err(dotenvy::Error::LineParse(_, index)) => {
                skipped += 1;
                warn!(
                    "Skipping unparsable entry in {} (position {})",
                    path.display(),
                    index
                );
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read env file: {}", path.display()));
            }
        }
    }

    debug!(
        "Read {} variables from {} ({} skipped)",
        vars.len(),
        path.display(),
        skipped
    );

    let source = if skipped == 0 {
        EnvSource::File(path)
    } else {
        EnvSource::Malformed(path)
    };

    Ok(EnvFile { source, vars })
}

/// Snapshot the process environment, filling gaps from the env file.
///
/// Variables already set in the process win over the file. The process
/// environment itself is never modified.
pub fn load_snapshot(path: Option<&Path>) -> Result<(EnvSnapshot, EnvSource)> {
    let env_file = load_env_file(path)?;

    let mut snapshot = EnvSnapshot::from_process();
    snapshot.fill_missing(env_file.vars);

    debug!("Captured {} environment variables", snapshot.len());
    Ok((snapshot, env_file.source))
}

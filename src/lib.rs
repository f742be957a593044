//! Credential Check Library
//!
//! Loads a `.env` file and reports whether the API key and API base URL are set,
//! masking the key so it can be shown safely in a terminal.

pub mod mask;
pub mod report;
pub mod snapshot;

pub use mask::{mask, mask_secret, MaskRule};
pub use report::{check_and_report, Reporter};
pub use snapshot::{load_env_file, load_snapshot, EnvFile, EnvSnapshot, EnvSource};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default name of the variable holding the API key
pub const DEFAULT_KEY_VAR: &str = "OPENAI_API_KEY";

/// Default name of the variable holding the API base URL
pub const DEFAULT_BASE_VAR: &str = "OPENAI_API_BASE";

/// Default configuration file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "credcheck.toml";

/// Configuration for the credential check
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Variable holding the API key (default: "OPENAI_API_KEY")
    pub key_var: Option<String>,
    /// Variable holding the API base URL (default: "OPENAI_API_BASE")
    pub base_var: Option<String>,
    /// Env file to load instead of searching for `.env`
    pub env_file: Option<PathBuf>,
}

impl Config {
    pub fn key_var(&self) -> &str {
        self.key_var.as_deref().unwrap_or(DEFAULT_KEY_VAR)
    }

    pub fn base_var(&self) -> &str {
        self.base_var.as_deref().unwrap_or(DEFAULT_BASE_VAR)
    }
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<Config> {
    let content = fs::read_to_string(config_path).context("Failed to read config file")?;
    let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;
    Ok(config)
}

/// Load the environment and write the report for `config` to `out`
pub fn report_with_config<W: Write>(config: &Config, out: &mut W) -> Result<EnvSource> {
    let (snapshot, source) = load_snapshot(config.env_file.as_deref())?;

    Reporter::from_config(config)
        .write_report(out, &snapshot)
        .context("Failed to write report")?;

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_variable_names() {
        let config = Config::default();
        assert_eq!(config.key_var(), "OPENAI_API_KEY");
        assert_eq!(config.base_var(), "OPENAI_API_BASE");
        assert!(config.env_file.is_none());
    }

    #[test]
    fn test_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("credcheck.toml");
        fs::write(
            &config_path,
            "key_var = \"OPENROUTER_API_KEY\"\nenv_file = \".env.local\"\n",
        )?;

        let config = load_config(&config_path)?;

        assert_eq!(config.key_var(), "OPENROUTER_API_KEY");
        assert_eq!(config.base_var(), "OPENAI_API_BASE");
        assert_eq!(config.env_file, Some(PathBuf::from(".env.local")));

        Ok(())
    }

    #[test]
    fn test_invalid_config_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("credcheck.toml");
        fs::write(&config_path, "key_var = [not toml")?;

        assert!(load_config(&config_path).is_err());
        assert!(load_config(temp_dir.path().join("missing.toml")).is_err());

        Ok(())
    }

    #[test]
    fn test_report_with_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let env_path = temp_dir.path().join("test.env");
        fs::write(
            &env_path,
            "CREDCHECK_LIB_TEST_KEY=sk-or-v1-abcdefghijklmno1234\n\
             CREDCHECK_LIB_TEST_BASE=https://openrouter.ai/api/v1\n",
        )?;

        let config = Config {
            key_var: Some("CREDCHECK_LIB_TEST_KEY".to_string()),
            base_var: Some("CREDCHECK_LIB_TEST_BASE".to_string()),
            env_file: Some(env_path.clone()),
        };

        let mut out = Vec::new();
        let source = report_with_config(&config, &mut out)?;
        let report = String::from_utf8(out)?;

        assert_eq!(source, EnvSource::File(env_path));
        assert!(report.contains("✅ CREDCHECK_LIB_TEST_KEY: sk-or-v1-a...1234\n"));
        assert!(report.contains("✅ CREDCHECK_LIB_TEST_BASE: https://openrouter.ai/api/v1\n"));
        assert!(!report.contains("abcdefghijklmno"));

        Ok(())
    }
}

//! Credential Check CLI
//!
//! Loads a `.env` file and prints whether the API key and API base URL are set,
//! showing only a masked preview of the key.

use anyhow::{Context, Result};
use clap::Parser;
use credcheck::{load_config, report_with_config, Config, EnvSource, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "credcheck")]
#[command(about = "Check that API credentials are set in your .env file")]
#[command(version)]
#[command(long_about = "
Credential Check loads environment variables from a .env file and reports whether
the API key and API base URL are set. The key is masked: only its first 10 and,
for keys longer than 14 characters, its last 4 characters are shown.

Examples:
  credcheck                          # Search for .env from the current directory
  credcheck -e .env.local            # Load a specific env file
  credcheck -c credcheck.toml        # Use custom variable names
")]
struct Cli {
    /// Env file to load (default: search for .env)
    #[arg(short, long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Configuration file path (default: credcheck.toml if present)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_path) => {
            debug!("Loading config from: {}", config_path.display());
            load_config(config_path).context("Failed to load configuration file")?
        }
        None => {
            let default_config = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_config.exists() {
                debug!("Loading default config: {}", default_config.display());
                load_config(default_config)?
            } else {
                Config::default()
            }
        }
    };

    // Command line arguments override the config file
    if let Some(env_file) = &cli.env_file {
        config.env_file = Some(env_file.clone());
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;

    let stdout = std::io::stdout();
    let source = report_with_config(&config, &mut stdout.lock())?;

    match source {
        EnvSource::File(path) => info!("Report based on {}", path.display()),
        EnvSource::NotFound => info!("Report based on process environment only"),
        EnvSource::Malformed(path) => info!("Report based on partially loaded {}", path.display()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["credcheck"]).unwrap();

        assert!(cli.env_file.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flag_parsing() {
        let cli = Cli::try_parse_from([
            "credcheck",
            "--env-file",
            ".env.local",
            "-c",
            "custom.toml",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.env_file, Some(PathBuf::from(".env.local")));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let cli = Cli::try_parse_from(["credcheck", "-c", "/nonexistent/credcheck.toml"]).unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_env_file_flag_overrides_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("credcheck.toml");
        std::fs::write(&config_path, "env_file = \"from-config.env\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "credcheck",
            "-e",
            "other.env",
            "-c",
            config_path.to_str().unwrap(),
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.env_file, Some(PathBuf::from("other.env")));
    }
}

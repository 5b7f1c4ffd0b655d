//! Command-line interface parsing for Kickoff
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the configuration the application starts with: the initial location, where
//! team data comes from, and where the cache lives.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::client::FOOTBALL_API_URL;
use crate::data::Deployment;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The starting location is not an absolute path
    #[error("Invalid path: '{0}'. Paths start with '/', e.g. /home, /favorite, /detail/57")]
    InvalidPath(String),
}

/// Kickoff - browse football teams and their squads
#[derive(Parser, Debug)]
#[command(name = "kickoff")]
#[command(about = "Browse football teams and squads from football-data.org")]
#[command(version)]
pub struct Cli {
    /// Location to open at startup
    ///
    /// Examples:
    ///   kickoff --path /favorite
    ///   kickoff --path /detail/57
    ///
    /// Unknown or malformed locations open the not-found screen.
    #[arg(long, value_name = "PATH", default_value = "/")]
    pub path: String,

    /// Origin of a hosted deployment; requests go through its proxy when the
    /// host is a vercel.app domain
    #[arg(long, value_name = "URL", env = "KICKOFF_ORIGIN")]
    pub origin: Option<String>,

    /// Base URL of the football-data teams API for direct requests
    #[arg(long, value_name = "URL", env = "FOOTBALL_API_URL", default_value = FOOTBALL_API_URL)]
    pub api_url: String,

    /// API token sent as X-Auth-Token on direct requests
    #[arg(long, value_name = "TOKEN", env = "FOOTBALL_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory for cached responses and the log file
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Ignore cached teams on startup and fetch fresh data
    #[arg(long)]
    pub refresh: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Path the session history starts at
    pub initial_path: String,
    /// Where team data is fetched from
    pub deployment: Deployment,
    /// Cache directory override
    pub cache_dir: Option<PathBuf>,
    /// Whether the first team load bypasses the cache
    pub force_refresh: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_path: "/".to_string(),
            deployment: Deployment::default(),
            cache_dir: None,
            force_refresh: false,
        }
    }
}

/// Checks that a starting location is an absolute path
pub fn parse_path_arg(s: &str) -> Result<String, CliError> {
    if s.starts_with('/') {
        Ok(s.to_string())
    } else {
        Err(CliError::InvalidPath(s.to_string()))
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the starting path is not absolute
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_path = parse_path_arg(&cli.path)?;
        let deployment = Deployment::detect(cli.origin.as_deref(), &cli.api_url, cli.token.clone());

        Ok(StartupConfig {
            initial_path,
            deployment,
            cache_dir: cli.cache_dir.clone(),
            force_refresh: cli.refresh,
        })
    }
}

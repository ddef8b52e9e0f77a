//! CLI command definitions and execution
//!
//! Every command goes through a `pio_s3::Client`, so each one accepts
//! local paths as well as `s3://bucket/key` paths.

use anyhow::Context as _;
use aws_config::BehaviorVersion;
use clap::{Parser, Subcommand};
use pio_core::{ClientConfig, ConfigManager, PathKind, classify};
use pio_s3::Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod download;
mod exists;
mod ls;
mod rm;
mod upload;
mod write;

/// pio - read and write local files and S3 objects by path
#[derive(Parser, Debug)]
#[command(name = "pio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// AWS profile to use instead of the AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY variables
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Bucket region; skips region discovery
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Upload without server-side encryption
    #[arg(long, global = true, default_value = "false")]
    pub no_encryption: bool,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the contents of a directory or S3 prefix
    #[command(visible_alias = "list")]
    Ls(ls::LsArgs),

    /// Download an S3 object to a local file
    Download(download::DownloadArgs),

    /// Upload a local file to an S3 path
    Upload(upload::UploadArgs),

    /// Delete a file or object
    #[command(visible_alias = "delete")]
    Rm(rm::RmArgs),

    /// Check whether a path exists
    Exists(exists::ExistsArgs),

    /// Write a string to a path
    Write(write::WriteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Client settings after merging the config file with command-line flags
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub profile: Option<String>,
    pub config: ClientConfig,
}

impl ClientOptions {
    /// Build a client for operating on `path`
    ///
    /// Remote paths get an SDK configuration loaded from the selected
    /// profile. Local paths never reach the SDK.
    pub async fn client_for(&self, path: &str) -> Client {
        match classify(path) {
            PathKind::Local => Client::new(self.config.clone()),
            PathKind::Remote => {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(profile) = self.profile.as_deref().filter(|p| !p.is_empty()) {
                    loader = loader.profile_name(profile);
                }
                Client::with_sdk_config(self.config.clone(), loader.load().await)
            }
        }
    }
}

/// Merge the config file with flags; flags win
fn client_options(cli: &Cli, manager: &ConfigManager) -> anyhow::Result<ClientOptions> {
    let file = manager
        .load()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))?;

    let mut config = file.client;
    if let Some(region) = &cli.region {
        config.region = Some(region.clone());
    }
    if cli.no_encryption {
        config.disable_encryption = true;
    }

    Ok(ClientOptions {
        profile: cli.profile.clone().or(file.profile),
        config,
    })
}

/// Print a failed operation and pick its exit code
fn report(formatter: &Formatter, action: &str, err: &pio_core::Error) -> ExitCode {
    tracing::debug!(error = ?err, "{action}");
    formatter.error(&format!("{action}: {err}"));
    ExitCode::from_error(err)
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    if let Commands::Completions(args) = &cli.command {
        return completions::execute(args);
    }

    let options = match ConfigManager::new()
        .map_err(anyhow::Error::from)
        .and_then(|manager| client_options(&cli, &manager))
    {
        Ok(options) => options,
        Err(e) => {
            Formatter::new(output_config).error(&format!("{e:#}"));
            return ExitCode::UsageError;
        }
    };

    match cli.command {
        Commands::Ls(args) => ls::execute(args, &options, output_config).await,
        Commands::Download(args) => download::execute(args, &options, output_config).await,
        Commands::Upload(args) => upload::execute(args, &options, output_config).await,
        Commands::Rm(args) => rm::execute(args, &options, output_config).await,
        Commands::Exists(args) => exists::execute(args, &options, output_config).await,
        Commands::Write(args) => write::execute(args, &options, output_config).await,
        Commands::Completions(args) => completions::execute(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pio_core::Config;
    use tempfile::TempDir;

    fn manager_with(config: Option<Config>) -> (ConfigManager, TempDir) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.toml"));
        if let Some(config) = config {
            manager.save(&config).unwrap();
        }
        (manager, dir)
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["pio", "ls", "s3://bucket/prefix/"]).unwrap();
        assert!(matches!(cli.command, Commands::Ls(ref a) if a.path == "s3://bucket/prefix/"));

        let cli = Cli::try_parse_from(["pio", "write", "hello", "/tmp/out.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Write(ref a) if a.contents == "hello" && a.destination == "/tmp/out.txt"
        ));

        assert!(Cli::try_parse_from(["pio", "upload", "s3://bucket/key"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let file = Config {
            profile: Some("from-file".into()),
            client: ClientConfig::new().with_region("eu-west-1"),
            ..Default::default()
        };
        let (manager, _dir) = manager_with(Some(file));

        let mut cli = Cli::try_parse_from([
            "pio",
            "--region",
            "us-west-2",
            "--no-encryption",
            "exists",
            "s3://bucket/key",
        ])
        .unwrap();
        // No --profile flag; AWS_PROFILE from the environment must not leak in.
        cli.profile = None;
        let options = client_options(&cli, &manager).unwrap();

        assert_eq!(options.config.region.as_deref(), Some("us-west-2"));
        assert!(options.config.disable_encryption);
        assert_eq!(options.profile.as_deref(), Some("from-file"));

        cli.profile = Some("from-flag".into());
        let options = client_options(&cli, &manager).unwrap();
        assert_eq!(options.profile.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_list_and_delete_aliases() {
        let cli = Cli::try_parse_from(["pio", "list", "s3://bucket/prefix/"]).unwrap();
        assert!(matches!(cli.command, Commands::Ls(ref a) if a.path == "s3://bucket/prefix/"));

        let cli = Cli::try_parse_from(["pio", "delete", "s3://bucket/key"]).unwrap();
        assert!(matches!(cli.command, Commands::Rm(ref a) if a.path == "s3://bucket/key"));
    }

    #[test]
    fn test_defaults_without_file() {
        let (manager, _dir) = manager_with(None);
        let cli = Cli::try_parse_from(["pio", "rm", "/tmp/x"]).unwrap();
        let options = client_options(&cli, &manager).unwrap();

        assert!(options.config.region.is_none());
        assert!(!options.config.disable_encryption);
    }

    #[test]
    fn test_bad_config_file_is_error() {
        let (manager, _dir) = manager_with(None);
        std::fs::write(manager.config_path(), "schema_version = \"nope\"").unwrap();
        let cli = Cli::try_parse_from(["pio", "rm", "/tmp/x"]).unwrap();

        let err = client_options(&cli, &manager).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load"));
    }
}

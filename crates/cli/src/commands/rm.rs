//! rm command - Delete a file or object

use clap::Args;
use pio_core::PathStore as _;

use super::{ClientOptions, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Outcome};

/// Delete a file or object
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Local path or s3://bucket/key to delete
    pub path: String,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, options: &ClientOptions, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = options.client_for(&args.path).await;

    if let Err(e) = client.delete(&args.path).await {
        return report(&formatter, &format!("Failed to delete {}", args.path), &e);
    }

    formatter.outcome(&Outcome::deleted(&args.path));
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_rm_local_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doomed");
        std::fs::write(&path, b"x").unwrap();

        let args = RmArgs {
            path: path.to_str().unwrap().to_string(),
        };
        let code = execute(args, &ClientOptions::default(), OutputConfig::default()).await;
        assert_eq!(code, ExitCode::Success);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_rm_missing_file() {
        let dir = TempDir::new().unwrap();
        let args = RmArgs {
            path: dir.path().join("absent").to_str().unwrap().to_string(),
        };
        let code = execute(args, &ClientOptions::default(), OutputConfig::default()).await;
        assert_eq!(code, ExitCode::NotFound);
    }
}

//! download command - Copy an S3 object (or file) to a local path

use clap::Args;
use pio_core::PathStore as _;

use super::{ClientOptions, report};
use crate::exit_code::ExitCode;
use crate::output::{Action, Formatter, OutputConfig, Outcome};

/// Download an S3 object to a local file
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Source s3://bucket/key
    pub s3_path: String,

    /// Local destination file
    pub local_path: String,
}

async fn download(client: &pio_s3::Client, source: &str, dest: &str) -> pio_core::Result<u64> {
    let mut reader = client.read(source).await?;
    let mut file = tokio::fs::File::create(dest).await?;
    let copied = tokio::io::copy(&mut reader, &mut file).await?;
    tokio::io::AsyncWriteExt::flush(&mut file).await?;
    Ok(copied)
}

/// Execute the download command
pub async fn execute(
    args: DownloadArgs,
    options: &ClientOptions,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = options.client_for(&args.s3_path).await;

    let size = match download(&client, &args.s3_path, &args.local_path).await {
        Ok(size) => size,
        Err(e) => {
            let action = format!("Failed to download {}", args.s3_path);
            return report(&formatter, &action, &e);
        }
    };

    formatter.outcome(&Outcome::transfer(
        Action::Downloaded,
        &args.s3_path,
        &args.local_path,
        size,
    ));
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_local_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        std::fs::write(&source, b"payload").unwrap();

        let args = DownloadArgs {
            s3_path: source.to_str().unwrap().to_string(),
            local_path: target.to_str().unwrap().to_string(),
        };
        let code = execute(args, &ClientOptions::default(), OutputConfig::default()).await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(std::fs::read(&target).unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_download_missing_source() {
        let dir = TempDir::new().unwrap();
        let args = DownloadArgs {
            s3_path: dir.path().join("missing").to_str().unwrap().to_string(),
            local_path: dir.path().join("out").to_str().unwrap().to_string(),
        };
        let code = execute(args, &ClientOptions::default(), OutputConfig::default()).await;
        assert_eq!(code, ExitCode::NotFound);
        assert!(!dir.path().join("out").exists());
    }
}

//! upload command - Stream a local file to an S3 path

use clap::Args;
use pio_core::PathStore as _;

use super::{ClientOptions, report};
use crate::exit_code::ExitCode;
use crate::output::{Action, Formatter, OutputConfig, Outcome};

/// Upload a local file to an S3 path
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Destination s3://bucket/key
    pub s3_path: String,

    /// Local file to upload
    pub local_path: String,
}

async fn upload(client: &pio_s3::Client, source: &str, dest: &str) -> pio_core::Result<u64> {
    let mut file = tokio::fs::File::open(source).await?;
    let size = file.metadata().await?.len();
    client.write_stream(dest, &mut file).await?;
    Ok(size)
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
    options: &ClientOptions,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = options.client_for(&args.s3_path).await;

    let size = match upload(&client, &args.local_path, &args.s3_path).await {
        Ok(size) => size,
        Err(e) => {
            let action = format!("Failed to upload {}", args.local_path);
            return report(&formatter, &action, &e);
        }
    };

    formatter.outcome(&Outcome::transfer(
        Action::Uploaded,
        &args.local_path,
        &args.s3_path,
        size,
    ));
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_to_local_destination() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        let target = dir.path().join("copy/out.bin");
        std::fs::write(&source, b"bytes").unwrap();

        let args = UploadArgs {
            s3_path: target.to_str().unwrap().to_string(),
            local_path: source.to_str().unwrap().to_string(),
        };
        let code = execute(args, &ClientOptions::default(), OutputConfig::default()).await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(std::fs::read(&target).unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_upload_missing_source() {
        let dir = TempDir::new().unwrap();
        let args = UploadArgs {
            s3_path: dir.path().join("out").to_str().unwrap().to_string(),
            local_path: dir.path().join("missing").to_str().unwrap().to_string(),
        };
        let code = execute(args, &ClientOptions::default(), OutputConfig::default()).await;
        assert_eq!(code, ExitCode::NotFound);
    }
}

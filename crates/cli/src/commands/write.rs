//! write command - Write a string to a path

use clap::Args;
use pio_core::PathStore as _;

use super::{ClientOptions, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Outcome};

/// Write a string to a local file or S3 object
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Text to write
    pub contents: String,

    /// Local path or s3://bucket/key to write to
    pub destination: String,
}

/// Execute the write command
pub async fn execute(
    args: WriteArgs,
    options: &ClientOptions,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = options.client_for(&args.destination).await;

    if let Err(e) = client
        .write(&args.destination, args.contents.as_bytes())
        .await
    {
        let action = format!("Failed to write {}", args.destination);
        return report(&formatter, &action, &e);
    }

    formatter.outcome(&Outcome::written(
        &args.destination,
        args.contents.len() as u64,
    ));
    ExitCode::Success
}

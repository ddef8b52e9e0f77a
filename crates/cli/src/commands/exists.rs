//! exists command - Check whether a path exists
//!
//! Both answers exit 0; only a failed check is an error.

use clap::Args;
use pio_core::PathStore as _;

use super::{ClientOptions, report};
use crate::exit_code::ExitCode;
use crate::output::{Existence, Formatter, OutputConfig};

/// Check whether a path exists
#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// Local path or s3://bucket/key to check
    pub path: String,
}

/// Execute the exists command
pub async fn execute(
    args: ExistsArgs,
    options: &ClientOptions,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = options.client_for(&args.path).await;

    let exists = match client.exists(&args.path).await {
        Ok(exists) => exists,
        Err(e) => return report(&formatter, &format!("Failed to check {}", args.path), &e),
    };

    formatter.existence(&Existence {
        path: &args.path,
        exists,
    });
    ExitCode::Success
}

//! ls command - List a directory or S3 prefix
//!
//! Local paths list the entries of the directory. Remote paths list the
//! keys and common prefixes directly under the given prefix.

use clap::Args;
use pio_core::PathStore as _;

use super::{ClientOptions, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Listing, OutputConfig};

/// List the contents of a directory or S3 prefix
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory or s3://bucket/prefix/ to list
    pub path: String,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, options: &ClientOptions, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = options.client_for(&args.path).await;

    let entries = match client.list_files(&args.path).await {
        Ok(entries) => entries,
        Err(e) => return report(&formatter, &format!("Failed to list {}", args.path), &e),
    };

    formatter.listing(&Listing {
        path: &args.path,
        entries: &entries,
    });

    ExitCode::Success
}

//! globus-http CLI - Download and upload files through the Globus HTTP API.

use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use globus_http::cli::{self, flag_present, normalize_args};
use globus_http::BuildInfo;

const BUILD_INFO: BuildInfo = BuildInfo::current();

#[tokio::main]
async fn main() -> ExitCode {
    let args = normalize_args(std::env::args_os());

    // Logs go to stderr; stdout carries the user-facing messages.
    init_logging(flag_present(&args, "verbose"));

    let code = cli::run_from(args, &BUILD_INFO, &mut io::stdout()).await;
    ExitCode::from(code)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("globus_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

//! Command-line shell: argument parsing, dispatch and exit codes.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::error::{ContextKind, ContextValue, ErrorKind as ClapErrorKind};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::debug;

use crate::client::build_client;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::GlobusError;
use crate::transfer::{Direction, TransferRequest};

/// Process exit code for success.
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit code for every kind of failure.
pub const EXIT_FAILURE: u8 = 1;

/// Long flags that may also be spelled with a single dash.
const SINGLE_DASH_FLAGS: &[&str] = &["config", "version", "verbose"];

const AFTER_HELP: &str = r#"Examples:

    Download
        globus-http download https://g-123456.12345.1234.data.globus.org/filename.txt filename.txt

    Upload
        globus-http upload filename.txt https://g-123456.12345.1234.data.globus.org/filename.txt

The configuration file is a TOML file with the following fields:

    ClientID = "your-client-id"
    ClientSecret = "your-client-secret"
    Scopes = ["scope1", "scope2", "scope3"]"#;

/// Version and build metadata baked in at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl BuildInfo {
    /// Metadata for this build. Commit and date come from the
    /// `GLOBUS_HTTP_COMMIT` and `GLOBUS_HTTP_BUILD_DATE` build-time variables.
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: match option_env!("GLOBUS_HTTP_COMMIT") {
                Some(commit) => commit,
                None => "none",
            },
            date: match option_env!("GLOBUS_HTTP_BUILD_DATE") {
                Some(date) => date,
                None => "unknown",
            },
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "globus-http {}, git-{}. Built {}",
            self.version, self.commit, self.date
        )
    }
}

/// Download and upload files through the Globus HTTP API.
#[derive(Parser, Debug)]
#[command(name = "globus-http")]
#[command(about, long_about = None, disable_version_flag = true, after_help = AFTER_HELP)]
pub struct Cli {
    /// Config file name and path.
    #[arg(long, env = "GLOBUS_HTTP_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Show version and exit.
    #[arg(long)]
    pub version: bool,

    /// Enable debug logging on stderr.
    #[arg(long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a URL to a local file.
    Download(Operands),

    /// Upload a local file to a URL.
    Upload(Operands),
}

/// Positional operands shared by both commands. Checked after parsing so a
/// missing one gets its own message.
#[derive(Args, Debug)]
pub struct Operands {
    /// Source URL (download) or local path (upload).
    pub source: Option<String>,

    /// Local path (download) or destination URL (upload).
    pub destination: Option<String>,

    /// Extra operands are accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}

impl Commands {
    /// Turn the parsed command into a transfer request.
    pub fn into_request(self) -> Result<TransferRequest, GlobusError> {
        let (direction, operands) = match self {
            Commands::Download(operands) => (Direction::Download, operands),
            Commands::Upload(operands) => (Direction::Upload, operands),
        };
        TransferRequest::from_operands(direction, operands.source, operands.destination)
    }
}

/// Rewrite Go-style `-config`, `-config=path`, `-version` and `-verbose`
/// into their `--` forms. Nothing after `--` is touched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.to_str() {
                Some(s) if is_single_dash_long_flag(s) => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) if !rest.starts_with('-') => {
            let name = rest.split('=').next().unwrap_or(rest);
            SINGLE_DASH_FLAGS.contains(&name)
        }
        _ => false,
    }
}

/// True if `--<name>` appears before any `--` separator. Expects
/// normalized args.
pub fn flag_present(args: &[OsString], name: &str) -> bool {
    let flag = format!("--{}", name);
    args.iter()
        .skip(1)
        .take_while(|arg| arg.as_os_str() != "--")
        .any(|arg| arg.as_os_str() == flag.as_str())
}

/// Parse `args` (program name first) and run, writing user output to `out`.
/// Returns the process exit code.
pub async fn run_from<I, T, W>(args: I, build: &BuildInfo, out: &mut W) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    let args = normalize_args(args);
    dispatch(&args, build, out).await.unwrap_or(EXIT_FAILURE)
}

async fn dispatch<W: Write>(args: &[OsString], build: &BuildInfo, out: &mut W) -> io::Result<u8> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(_) if flag_present(args, "version") => {
            writeln!(out, "{}", build)?;
            return Ok(EXIT_SUCCESS);
        }
        Err(err) => return report_parse_error(err, build, out),
    };

    if cli.version {
        writeln!(out, "{}", build)?;
        return Ok(EXIT_SUCCESS);
    }

    let Some(command) = cli.command else {
        writeln!(out, "Missing command.")?;
        print_help(build, out)?;
        return Ok(EXIT_FAILURE);
    };

    let request = match command.into_request() {
        Ok(request) => request,
        Err(err) => {
            writeln!(out, "{}", err)?;
            print_help(build, out)?;
            return Ok(EXIT_FAILURE);
        }
    };

    match execute(&cli.config, &request).await {
        Ok(_) => Ok(EXIT_SUCCESS),
        Err(err) => {
            writeln!(out, "ERROR: {:#}", err)?;
            Ok(EXIT_FAILURE)
        }
    }
}

/// Load the config once, build the client and perform the transfer.
async fn execute(config_path: &Path, request: &TransferRequest) -> anyhow::Result<u64> {
    debug!(config = %config_path.display(), direction = %request.direction(), "starting transfer");

    let config = Config::from_file(config_path).context("failed to get client")?;
    let client = build_client(config);

    Ok(request.execute(&client).await?)
}

fn report_parse_error<W: Write>(err: clap::Error, build: &BuildInfo, out: &mut W) -> io::Result<u8> {
    match err.kind() {
        ClapErrorKind::DisplayHelp => {
            print_help(build, out)?;
            Ok(EXIT_SUCCESS)
        }
        ClapErrorKind::InvalidSubcommand => {
            let name = match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(name)) => name.clone(),
                _ => String::new(),
            };
            writeln!(out, "{}", GlobusError::UnknownCommand(name))?;
            print_help(build, out)?;
            Ok(EXIT_FAILURE)
        }
        _ => {
            // The rendered error carries its own usage block; keep the first line.
            let rendered = err.to_string();
            writeln!(out, "{}", rendered.lines().next().unwrap_or_default())?;
            print_help(build, out)?;
            Ok(EXIT_FAILURE)
        }
    }
}

fn print_help<W: Write>(build: &BuildInfo, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", Cli::command().render_help())?;
    writeln!(out)?;
    writeln!(out, "{}", build)
}

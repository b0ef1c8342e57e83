use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use binobj_junction::app::{load_settings, run};
use binobj_junction::fs_op::path::{absolutize, resolve_root};
use binobj_junction::{NativeJunctions, OutputLayout};

#[derive(Parser, Debug)]
#[command(
    name = "binobj-junction",
    author,
    version,
    about = "Move bin/obj build output out of a source tree by replacing the folders with junctions",
    long_about = None
)]
struct Args {
    /// Source tree to scan (must not be inside a dot folder such as .git)
    source_root: String,

    /// Directory that receives the redirected build output
    junction_root: String,

    /// Settings file (defaults to <SOURCE_ROOT>/binobj-junction.toml, then the user config)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Layout of output junctions under the aggregate folder
    #[arg(long, value_enum)]
    layout: Option<OutputLayout>,

    /// Link declared output paths as written instead of collapsing them to `bin`
    #[arg(long)]
    no_collapse_bin: bool,

    /// Exit with status 1 when any junction could not be created
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version requests are not failures.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging(args.verbose);

    match execute(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<ExitCode> {
    let cwd = env::current_dir().context("cannot determine the working directory")?;

    let source_root = resolve_root(&args.source_root, &cwd).context("invalid <SOURCE_ROOT>")?;
    if args.junction_root.trim().is_empty() {
        bail!("<JUNCTION_ROOT> must not be empty");
    }
    let junction_root = absolutize(Path::new(args.junction_root.trim()), &cwd);

    let mut settings = load_settings(args.config.as_deref(), &source_root)?;
    if let Some(layout) = args.layout {
        settings.output_layout = layout;
    }
    if args.no_collapse_bin {
        settings.collapse_to_bin = false;
    }
    tracing::debug!("settings: {:?}", settings);

    let report = run(&source_root, &junction_root, &settings, NativeJunctions)
        .with_context(|| format!("failed to scan {}", source_root.display()))?;

    for entry in report.notable() {
        println!("{}", entry);
    }
    println!("{}", report.summary());

    if args.strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

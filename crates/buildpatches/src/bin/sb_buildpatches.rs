//! `sb-buildpatches` — build distributable Starbound mod patches.
//!
//! Usage:
//!   sb-buildpatches --working-dir <mod-tree> --dest <out> --assets <unpacked-assets>
//!
//! Exits non-zero if any file failed; per-file failures do not stop the
//! run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use sb_buildpatches::{build, BuildConfig, ClassifyTables};

#[derive(Parser)]
#[command(
    name = "sb-buildpatches",
    about = "Starbound mod helper - patch file builder",
    version,
)]
struct Cli {
    /// Root of the mod's edited asset tree
    #[arg(long)]
    working_dir: PathBuf,

    /// Root under which patch files and copied files are written
    #[arg(long)]
    dest: PathBuf,

    /// Root of the unpacked, unmodified Starbound asset files
    #[arg(long)]
    assets: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match BuildConfig::new(cli.working_dir, cli.dest, cli.assets) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    let report = build(&config, &ClassifyTables::default());
    if report.has_failures() {
        error!(
            failed = report.failures().count(),
            total = report.outcomes.len(),
            "finished with failures"
        );
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

//! yunpack CLI - Platform preparation for yunpack projects
//!
//! Commands:
//! - `yunpack prepare` - Rebuild the platform config, manifest, resources and www
//! - `yunpack clean` - Remove prepared www, icons and splash screens
//! - `yunpack plugins` - List plugin services of the platform config
//! - `yunpack version-code` - Print the build version code for a version
//! - `yunpack check` - Validate the project descriptor and platform manifest

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod clean;
mod context;
mod diagnostics;
mod plugins;
mod prepare;

use context::Context;

#[derive(Parser)]
#[command(name = "yunpack")]
#[command(author, version, about = "Platform preparation for yunpack projects", long_about = None)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the platform from the project
    Prepare,

    /// Remove prepared files
    Clean {
        /// Leave prepared files in place
        #[arg(long)]
        no_prepare: bool,
    },

    /// List plugin services declared in the platform config.xml
    Plugins,

    /// Print the build version code derived from a version string
    VersionCode {
        /// Version string, e.g. 1.2.3 or 1.2.3-beta
        version: String,
    },

    /// Validate the project descriptor and platform manifest
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::VersionCode { version } = &cli.command {
        println!("{}", yunpack_core::version_code(version));
        return Ok(());
    }

    // Flags apply while the settings file is read; its level takes over after
    let initial = context::resolve_level(cli.verbose, cli.log_level.as_deref(), "info")?;
    yunpack_logging::init_logging(initial);
    let ctx = Context::load(cli.project, cli.log_level.as_deref(), cli.verbose)?;
    if ctx.log_level != initial {
        yunpack_logging::set_log_level(ctx.log_level)?;
    }

    match cli.command {
        Commands::Prepare => prepare::run(&ctx)?,
        Commands::Clean { no_prepare } => clean::run(&ctx, no_prepare)?,
        Commands::Plugins => plugins::run(&ctx)?,
        Commands::Check => check::run(&ctx)?,
        Commands::VersionCode { .. } => {}
    }

    Ok(())
}

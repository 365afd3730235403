//! Clean command implementation

use crate::context::Context;
use crate::diagnostics::WarningCollector;
use anyhow::{Context as _, Result};
use yunpack_prepare::{CleanOptions, PlatformApi};

/// Run the clean command
pub fn run(ctx: &Context, no_prepare: bool) -> Result<()> {
    let api = PlatformApi::open(&ctx.root, &ctx.settings).context("Failed to open platform")?;

    let warnings = WarningCollector::install();
    match api
        .clean(&CleanOptions { no_prepare })
        .context("Clean failed")?
    {
        Some(report) => {
            println!("✓ www: {} deleted", report.www.deleted.len());
            println!("✓ Icons: {} deleted", report.icons.len());
            println!("✓ Splash screens: {} deleted", report.splashes.len());
        }
        None => println!("Nothing to clean"),
    }
    warnings.report();

    Ok(())
}

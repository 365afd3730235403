//! Prepare command implementation

use crate::context::Context;
use crate::diagnostics::WarningCollector;
use anyhow::{Context as _, Result};
use tracing::debug;
use yunpack_core::ProjectConfig;
use yunpack_prepare::PlatformApi;

/// Run the prepare command
pub fn run(ctx: &Context) -> Result<()> {
    let mut api = PlatformApi::open(&ctx.root, &ctx.settings)
        .context("Failed to open platform")?;
    debug!("Platform locations: {:?}", api.locations());
    let config_path = &api.project().config_xml;
    let project = ProjectConfig::load(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    println!("Preparing {} for {}", project.name(), api.platform());

    let warnings = WarningCollector::install();
    let report = api.prepare(&project).context("Prepare failed")?;

    println!(
        "✓ www: {} copied, {} unchanged, {} deleted",
        report.www.copied.len(),
        report.www.unchanged,
        report.www.deleted.len()
    );
    println!("✓ Icons: {} copied", report.icons.copied.len());
    println!("✓ Splash screens: {} copied", report.splashes.copied.len());
    warnings.report();
    println!("\nPrepared {} project successfully!", api.platform());

    Ok(())
}

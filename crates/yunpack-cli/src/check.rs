//! Check command implementation

use crate::context::Context;
use anyhow::{Context as _, Result};
use yunpack_core::{ProjectConfig, version_code};
use yunpack_prepare::{CONFIG_FILE, ManifestPatcher};

/// What a successful check found
#[derive(Debug)]
pub struct CheckSummary {
    pub package: String,
    pub name: String,
    pub version: String,
    pub version_code: u64,
    /// Page count of the platform manifest, when one exists
    pub manifest_pages: Option<usize>,
}

/// Validate the project descriptor and, if present, the platform manifest
pub fn inspect(ctx: &Context) -> Result<CheckSummary> {
    let config_path = ctx.root.join(CONFIG_FILE);
    let config = ProjectConfig::load(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid descriptor {}", config_path.display()))?;

    let manifest_path = ctx.locations().manifest;
    let manifest_pages = if manifest_path.exists() {
        let manifest = ManifestPatcher::new(&manifest_path)
            .load()
            .with_context(|| format!("Invalid manifest {}", manifest_path.display()))?;
        Some(manifest.pages.len())
    } else {
        None
    };

    Ok(CheckSummary {
        package: config.package_name().to_string(),
        name: config.name().to_string(),
        version: config.version().to_string(),
        version_code: version_code(config.version()),
        manifest_pages,
    })
}

/// Run the check command
pub fn run(ctx: &Context) -> Result<()> {
    println!("Checking project: {}", ctx.root.display());

    let summary = inspect(ctx)?;

    println!("✓ Package: {}", summary.package);
    println!(
        "✓ App: {} v{} (code {})",
        summary.name, summary.version, summary.version_code
    );
    match summary.manifest_pages {
        Some(pages) => println!("✓ Manifest: {pages} page(s)"),
        None => println!("- Manifest: not created yet"),
    }
    println!("\nProject is valid!");

    Ok(())
}

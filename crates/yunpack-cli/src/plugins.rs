//! Plugins command implementation

use crate::context::Context;
use anyhow::{Context as _, Result};
use yunpack_runtime::load_plugins_from;

/// Run the plugins command
pub fn run(ctx: &Context) -> Result<()> {
    let config_xml = ctx.locations().config_xml;
    let registry = load_plugins_from(&config_xml).with_context(|| {
        format!(
            "Failed to read {} (run `yunpack prepare` first)",
            config_xml.display()
        )
    })?;

    if registry.is_empty() {
        println!("No plugin services declared");
        return Ok(());
    }

    for service in &registry {
        let package = if service.path.is_empty() {
            "-"
        } else {
            service.path.as_str()
        };
        let onload = if service.onload { " (onload)" } else { "" };
        println!("{:<24} {package}{onload}", service.name);
    }

    Ok(())
}

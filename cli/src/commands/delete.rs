use anyhow::{Context, Result, bail};
use parcel_core::kubernetes::config_maps::ConfigMaps;
use parcel_core::kubernetes::labels::LabelSelector;

use crate::cli::Cli;

pub async fn handle_delete_command(config_maps: &ConfigMaps, name: &str, cli: &Cli) -> Result<()> {
    config_maps
        .delete(&cli.namespace, name)
        .await
        .with_context(|| format!("Could not delete configmap/{name}"))?;

    println!("configmap/{name} deleted");
    Ok(())
}

pub async fn handle_delete_by_label_command(
    config_maps: &ConfigMaps,
    selector: &LabelSelector,
    cli: &Cli,
) -> Result<()> {
    require_labels(selector)?;

    config_maps
        .delete_by_label(&cli.namespace, selector.labels())
        .await
        .with_context(|| format!("Could not delete configmaps matching {selector}"))?;

    println!("configmaps matching {selector} deleted from {}", cli.namespace);
    Ok(())
}

/// An empty selector would wipe the whole namespace, which the command line never does.
fn require_labels(selector: &LabelSelector) -> Result<()> {
    if selector.is_empty() {
        bail!("delete-by-label needs at least one label, e.g. -l app=x");
    }
    Ok(())
}

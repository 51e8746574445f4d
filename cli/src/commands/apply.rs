use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use parcel_core::kubernetes::config_maps::ConfigMaps;

use crate::cli::{Cli, ConfigMapArgs, OutputFormat};
use crate::commands::get::render_one;
use crate::sources::{collect_data, collect_labels};

pub async fn handle_create_command(
    config_maps: &ConfigMaps,
    args: &ConfigMapArgs,
    cli: &Cli,
) -> Result<()> {
    let labels = collect_labels(&args.labels)?;
    let data = collect_data(&args.literals, &args.files)?;

    let created = config_maps
        .create(&cli.namespace, &args.name, &labels, data)
        .await
        .with_context(|| format!("Could not create configmap/{}", args.name))?;

    report(&created, &args.name, "created", cli.output)
}

pub async fn handle_replace_command(
    config_maps: &ConfigMaps,
    args: &ConfigMapArgs,
    cli: &Cli,
) -> Result<()> {
    let labels = collect_labels(&args.labels)?;
    let data = collect_data(&args.literals, &args.files)?;

    let replaced = config_maps
        .replace(&cli.namespace, &args.name, &labels, data)
        .await
        .with_context(|| format!("Could not replace configmap/{}", args.name))?;

    report(&replaced, &args.name, "replaced", cli.output)
}

fn report(config_map: &ConfigMap, name: &str, verb: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("configmap/{name} {verb}"),
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", render_one(config_map, format)?);
        }
    }
    Ok(())
}

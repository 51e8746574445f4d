use anyhow::{Context, Result, bail};
use itertools::Itertools;
use k8s_openapi::api::core::v1::ConfigMap;
use parcel_core::kubernetes::config_maps::ConfigMaps;
use parcel_core::kubernetes::labels::LabelSelector;
use tabled::{Table, Tabled};

use crate::cli::{Cli, OutputFormat};
use crate::table_theme::TableTheme;

#[derive(Debug, Clone, Tabled)]
pub struct ConfigMapRow {
    pub name: String,
    pub namespace: String,
    pub data: usize,
    pub labels: String,
}

impl ConfigMapRow {
    pub fn from_config_map(config_map: &ConfigMap) -> Self {
        let metadata = &config_map.metadata;
        let data = config_map.data.as_ref().map_or(0, |d| d.len())
            + config_map.binary_data.as_ref().map_or(0, |d| d.len());

        let labels = metadata
            .labels
            .as_ref()
            .map(|labels| {
                labels
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .join(",")
            })
            .filter(|rendered| !rendered.is_empty())
            .unwrap_or_else(|| "<none>".to_string());

        Self {
            name: metadata.name.clone().unwrap_or_default(),
            namespace: metadata.namespace.clone().unwrap_or_default(),
            data,
            labels,
        }
    }
}

pub async fn handle_get_command(config_maps: &ConfigMaps, name: &str, cli: &Cli) -> Result<()> {
    let Some(config_map) = config_maps
        .get(&cli.namespace, name)
        .await
        .with_context(|| format!("Could not get configmap/{name}"))?
    else {
        bail!("configmap/{name} not found in namespace {}", cli.namespace);
    };

    println!("{}", render_one(&config_map, cli.output)?);
    Ok(())
}

pub async fn handle_list_command(
    config_maps: &ConfigMaps,
    selector: Option<&LabelSelector>,
    cli: &Cli,
) -> Result<()> {
    let labels = selector.map(|s| s.labels().clone()).unwrap_or_default();
    let items = config_maps
        .list_by_label(&cli.namespace, &labels)
        .await
        .context("Could not list configmaps")?;

    if items.is_empty() && cli.output == OutputFormat::Table {
        println!("{}", TableTheme::empty_message(&cli.namespace));
        return Ok(());
    }

    println!("{}", render_many(&items, cli.output)?);
    Ok(())
}

pub fn render_one(config_map: &ConfigMap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(std::slice::from_ref(config_map))),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config_map)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(config_map)?),
    }
}

pub fn render_many(config_maps: &[ConfigMap], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(config_maps)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config_maps)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(config_maps)?),
    }
}

fn table(config_maps: &[ConfigMap]) -> String {
    let rows: Vec<ConfigMapRow> = config_maps.iter().map(ConfigMapRow::from_config_map).collect();
    TableTheme::apply_default(Table::new(rows)).to_string()
}

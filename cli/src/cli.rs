use crate::sources::{FileSource, parse_key_value};
use clap::{Args, Parser, Subcommand};
use parcel_core::constants::{DEFAULT_NAMESPACE, MANAGED_BY_LABEL, MANAGED_BY_VALUE};
use parcel_core::kubernetes::labels::LabelSelector;
use parcel_core::options::Options;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "parcelctl",
    about = "Manage the ConfigMaps parcel keeps in a Kubernetes cluster",
    version,
    long_about = "Create, replace, inspect and delete ConfigMaps labelled as managed by parcel."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Kubernetes namespace to operate in
    #[arg(short, long, global = true, env = "PARCEL_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Kubeconfig file path
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Label key marking ConfigMaps as managed by parcel
    #[arg(long, global = true, env = "PARCEL_MANAGED_BY_LABEL", default_value = MANAGED_BY_LABEL)]
    pub managed_by_label: String,

    /// Value of the managed-by label
    #[arg(long, global = true, env = "PARCEL_MANAGED_BY_VALUE", default_value = MANAGED_BY_VALUE)]
    pub managed_by_value: String,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options::builder()
            .managed_by_label(self.managed_by_label.clone())
            .managed_by_value(self.managed_by_value.clone())
            .build()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a ConfigMap; fails if it already exists
    Create(ConfigMapArgs),
    /// Delete and recreate a ConfigMap with new labels and data
    Replace(ConfigMapArgs),
    /// Delete a ConfigMap; succeeds if it is already gone
    Delete {
        /// ConfigMap name
        name: String,
    },
    /// Delete every ConfigMap matching a label selector
    #[command(name = "delete-by-label")]
    DeleteByLabel {
        /// Equality selector, e.g. app=x,tier=web
        #[arg(short = 'l', long, required = true)]
        selector: LabelSelector,
    },
    /// Show a single ConfigMap
    Get {
        /// ConfigMap name
        name: String,
    },
    /// List ConfigMaps, optionally filtered by a label selector
    List {
        /// Equality selector, e.g. app=x,tier=web
        #[arg(short = 'l', long)]
        selector: Option<LabelSelector>,
    },
}

#[derive(Args, Debug)]
pub struct ConfigMapArgs {
    /// ConfigMap name
    pub name: String,

    /// Label to attach, as key=value (repeatable)
    #[arg(short = 'l', long = "label", value_parser = parse_key_value)]
    pub labels: Vec<(String, String)>,

    /// Data entry given inline, as key=value (repeatable)
    #[arg(long = "from-literal", value_parser = parse_key_value)]
    pub literals: Vec<(String, String)>,

    /// Data entry read from a file, as [key=]path; the key defaults to the file name
    #[arg(long = "from-file")]
    pub files: Vec<FileSource>,
}

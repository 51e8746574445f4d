pub mod apply;
pub mod delete;
pub mod get;

use anyhow::Result;
use parcel_core::kubernetes::config_maps::ConfigMaps;

use crate::cli::{Cli, Commands};

/// Main command dispatcher
pub async fn handle_command(config_maps: &ConfigMaps, cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Create(args) => {
            apply::handle_create_command(config_maps, args, cli).await?;
        }
        Commands::Replace(args) => {
            apply::handle_replace_command(config_maps, args, cli).await?;
        }
        Commands::Delete { name } => {
            delete::handle_delete_command(config_maps, name, cli).await?;
        }
        Commands::DeleteByLabel { selector } => {
            delete::handle_delete_by_label_command(config_maps, selector, cli).await?;
        }
        Commands::Get { name } => {
            get::handle_get_command(config_maps, name, cli).await?;
        }
        Commands::List { selector } => {
            get::handle_list_command(config_maps, selector.as_ref(), cli).await?;
        }
    }
    Ok(())
}

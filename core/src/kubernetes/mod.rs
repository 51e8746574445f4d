mod client;
pub mod config_maps;
pub mod errors;
pub mod labels;
pub mod validation;

pub use client::{ClientError, create_kube_client};

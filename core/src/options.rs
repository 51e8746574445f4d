use crate::constants::{MANAGED_BY_LABEL, MANAGED_BY_VALUE};
use getset::Getters;
use typed_builder::TypedBuilder;

/// Settings shared by every object the tool writes into a cluster.
#[derive(Debug, Clone, Getters, TypedBuilder, PartialEq, Eq)]
pub struct Options {
    /// Label key stamped on every created object to mark it as ours.
    #[getset(get = "pub")]
    #[builder(default = MANAGED_BY_LABEL.to_string(), setter(into))]
    managed_by_label: String,

    #[getset(get = "pub")]
    #[builder(default = MANAGED_BY_VALUE.to_string(), setter(into))]
    managed_by_value: String,
}

impl Default for Options {
    fn default() -> Self {
        Self::builder().build()
    }
}

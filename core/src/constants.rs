pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
pub const MANAGED_BY_VALUE: &str = "parcel";

pub const DEFAULT_NAMESPACE: &str = "default";

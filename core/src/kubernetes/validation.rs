//! Client-side checks for the identifiers we send to the API server.
//!
//! These mirror the apiserver's own rules closely enough that obviously bad
//! input fails fast, before a round trip.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const LABEL_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;
const CONFIG_MAP_KEY_MAX_LENGTH: usize = 253;

#[allow(clippy::expect_used)] // Static patterns
static DNS1123_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid pattern"));

#[allow(clippy::expect_used)]
static DNS1123_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid pattern")
});

#[allow(clippy::expect_used)]
static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("valid pattern")
});

#[allow(clippy::expect_used)]
static CONFIG_MAP_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[-._a-zA-Z0-9]+$").expect("valid pattern"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid namespace {0:?}: must be a lowercase RFC 1123 label")]
    Namespace(String),
    #[error("Invalid name {0:?}: must be a lowercase RFC 1123 subdomain")]
    Name(String),
    #[error("Invalid data key {0:?}: must consist of alphanumerics, '-', '_' or '.'")]
    DataKey(String),
    #[error("Invalid label key {0:?}")]
    LabelKey(String),
    #[error("Invalid label value {value:?} for key {key:?}")]
    LabelValue { key: String, value: String },
    #[error("Malformed label selector term {0:?}, expected key=value")]
    SelectorTerm(String),
}

fn is_dns1123_label(value: &str) -> bool {
    value.len() <= DNS1123_LABEL_MAX_LENGTH && DNS1123_LABEL.is_match(value)
}

fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH && DNS1123_SUBDOMAIN.is_match(value)
}

pub fn validate_namespace(namespace: &str) -> Result<(), ValidationError> {
    if is_dns1123_label(namespace) {
        Ok(())
    } else {
        Err(ValidationError::Namespace(namespace.to_string()))
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_dns1123_subdomain(name) {
        Ok(())
    } else {
        Err(ValidationError::Name(name.to_string()))
    }
}

pub fn validate_data_key(key: &str) -> Result<(), ValidationError> {
    let valid = key.len() <= CONFIG_MAP_KEY_MAX_LENGTH
        && CONFIG_MAP_KEY.is_match(key)
        && key != "."
        && !key.starts_with("..");

    if valid {
        Ok(())
    } else {
        Err(ValidationError::DataKey(key.to_string()))
    }
}

/// Label keys are `[prefix/]name`, where the prefix is a DNS subdomain.
pub fn validate_label_key(key: &str) -> Result<(), ValidationError> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    let prefix_ok = prefix.is_none_or(is_dns1123_subdomain);
    let name_ok = name.len() <= LABEL_NAME_MAX_LENGTH && QUALIFIED_NAME.is_match(name);

    if prefix_ok && name_ok {
        Ok(())
    } else {
        Err(ValidationError::LabelKey(key.to_string()))
    }
}

pub fn validate_label_value(key: &str, value: &str) -> Result<(), ValidationError> {
    let valid = value.is_empty()
        || (value.len() <= LABEL_VALUE_MAX_LENGTH && QUALIFIED_NAME.is_match(value));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::LabelValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

use crate::kubernetes::validation::{ValidationError, validate_label_key, validate_label_value};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type Labels = BTreeMap<String, String>;

/// An equality-based label selector, e.g. `app=x,tier=web`.
///
/// An empty selector matches every object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector(Labels);

pub fn validate_labels(labels: &Labels) -> Result<(), ValidationError> {
    for (key, value) in labels {
        validate_label_key(key)?;
        validate_label_value(key, value)?;
    }
    Ok(())
}

impl LabelSelector {
    pub fn new(labels: Labels) -> Result<Self, ValidationError> {
        validate_labels(&labels)?;
        Ok(Self(labels))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &Labels {
        &self.0
    }

    /// True when `labels` carries every key/value pair of this selector.
    pub fn matches(&self, labels: &Labels) -> bool {
        self.0
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

impl Display for LabelSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .join(",");
        f.write_str(&rendered)
    }
}

impl FromStr for LabelSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let labels = s
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| {
                let (key, value) = term
                    .split_once("==")
                    .or_else(|| term.split_once('='))
                    .ok_or_else(|| ValidationError::SelectorTerm(term.to_string()))?;
                Ok((key.trim().to_string(), value.trim().to_string()))
            })
            .collect::<Result<Labels, ValidationError>>()?;

        Self::new(labels)
    }
}

impl TryFrom<Labels> for LabelSelector {
    type Error = ValidationError;

    fn try_from(labels: Labels) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

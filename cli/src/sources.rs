use anyhow::{Context, Result, bail};
use parcel_core::kubernetes::config_maps::BinaryData;
use parcel_core::kubernetes::labels::Labels;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    if key.is_empty() {
        return Err(format!("missing key in {s:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// A `--from-file` argument: `path` or `key=path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    key: Option<String>,
    path: PathBuf,
}

impl FileSource {
    pub fn key(&self) -> Result<String> {
        if let Some(key) = &self.key {
            return Ok(key.clone());
        }
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("Cannot derive a key from {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FromStr for FileSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, _)) if key.is_empty() => Err(format!("missing key in {s:?}")),
            Some((_, path)) if path.is_empty() => Err(format!("missing path in {s:?}")),
            Some((key, path)) => Ok(Self {
                key: Some(key.to_string()),
                path: PathBuf::from(path),
            }),
            None if s.is_empty() => Err("missing path".to_string()),
            None => Ok(Self {
                key: None,
                path: PathBuf::from(s),
            }),
        }
    }
}

pub fn collect_labels(pairs: &[(String, String)]) -> Result<Labels> {
    let mut labels = Labels::new();
    for (key, value) in pairs {
        if labels.insert(key.clone(), value.clone()).is_some() {
            bail!("Label {key:?} given more than once");
        }
    }
    Ok(labels)
}

/// Merges inline literals and file contents into ConfigMap binary data.
pub fn collect_data(literals: &[(String, String)], files: &[FileSource]) -> Result<BinaryData> {
    let mut data = BinaryData::new();

    for (key, value) in literals {
        if data.insert(key.clone(), value.as_bytes().to_vec()).is_some() {
            bail!("Data key {key:?} given more than once");
        }
    }

    for file in files {
        let key = file.key()?;
        let contents = std::fs::read(file.path())
            .with_context(|| format!("Failed to read {}", file.path().display()))?;
        if data.insert(key.clone(), contents).is_some() {
            bail!("Data key {key:?} given more than once");
        }
    }

    Ok(data)
}

use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, InternalResult};

/// Settings of a design evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub transport_ordering: TransportOrdering,

    /// Name given to the API node created when the design declares none.
    #[serde(default = "default_api_name")]
    pub default_api_name: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            transport_ordering: TransportOrdering::default(),
            default_api_name: default_api_name(),
        }
    }
}

impl EvalConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }
}

/// How transport services are ordered so parents are walked before children.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransportOrdering {
    /// Full topological order over parent links. Handles any nesting depth
    /// and rejects cycles.
    #[default]
    Topological,
    /// A single stable pass of adjacent swaps. Only guaranteed for one level
    /// of parent/child nesting; deeper chains may keep a child ahead of its
    /// parent.
    SinglePass,
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::Config(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_api_name() -> String {
    "API".to_string()
}

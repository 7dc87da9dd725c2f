use super::vehicle::enabled;
use super::Entity;
use serde::{Deserialize, Serialize};

/// A track available to race on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Map {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub lap_length_m: Option<u32>,
    /// Free-form coordinate records, e.g. `{"x": 1.0, "y": 2.0, "z": 0.5}`.
    #[serde(default)]
    pub checkpoints: Option<Vec<serde_json::Map<String, serde_json::Value>>>,
    #[serde(default = "enabled")]
    pub is_enabled: bool,
}

impl Entity for Map {
    const NAME: &'static str = "Map";
    const COLLECTION: &'static str = "map";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "code",
        "author",
        "lap_length_m",
        "checkpoints",
        "is_enabled",
    ];
}

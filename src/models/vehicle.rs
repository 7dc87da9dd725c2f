use super::Entity;
use serde::{Deserialize, Serialize};

/// A vehicle that can be selected for a race. `code` is the spawn code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default = "enabled")]
    pub is_enabled: bool,
}

pub(crate) fn enabled() -> bool {
    true
}

impl Entity for Vehicle {
    const NAME: &'static str = "Vehicle";
    const COLLECTION: &'static str = "vehicle";
    const FIELDS: &'static [&'static str] = &["name", "code", "class_name", "is_enabled"];
}

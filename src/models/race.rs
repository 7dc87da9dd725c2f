use super::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RaceStatus {
    #[default]
    Pending,
    Active,
    Finished,
    Cancelled,
}

/// A race session on one map. `map_code` and `allowed_vehicle_codes` are
/// plain codes; nothing checks that they exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Race {
    pub map_code: String,
    pub laps: i64,
    #[serde(default)]
    pub allowed_vehicle_codes: Vec<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub status: RaceStatus,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
}

impl Entity for Race {
    const NAME: &'static str = "Race";
    const COLLECTION: &'static str = "race";
    const FIELDS: &'static [&'static str] = &[
        "map_code",
        "laps",
        "allowed_vehicle_codes",
        "created_by",
        "status",
        "starts_at",
    ];
}

#[derive(Debug, Deserialize)]
pub struct RaceCreate {
    pub map_code: String,
    pub laps: i64,
    #[serde(default)]
    pub allowed_vehicle_codes: Vec<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl From<RaceCreate> for Race {
    fn from(req: RaceCreate) -> Self {
        Race {
            map_code: req.map_code,
            laps: req.laps,
            allowed_vehicle_codes: req.allowed_vehicle_codes,
            created_by: req.created_by,
            status: RaceStatus::Pending,
            starts_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RaceCreated {
    pub id: String,
}

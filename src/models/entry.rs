use super::Entity;
use serde::{Deserialize, Serialize};

/// A player's result for one race. `position` is only ever filled in on
/// leaderboard reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub race_id: String,
    pub player_name: String,
    pub vehicle_code: String,
    #[serde(default)]
    pub total_time_ms: Option<u64>,
    #[serde(default)]
    pub best_lap_ms: Option<u64>,
    #[serde(default)]
    pub laps_completed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Entity for Entry {
    const NAME: &'static str = "Entry";
    const COLLECTION: &'static str = "entry";
    const FIELDS: &'static [&'static str] = &[
        "race_id",
        "player_name",
        "vehicle_code",
        "total_time_ms",
        "best_lap_ms",
        "laps_completed",
        "position",
    ];
}

use crate::error::AppError;
use crate::models::race::RaceCreate;
use crate::object_id::ObjectId;

const MIN_LAPS: i64 = 1;
const MAX_LAPS: i64 = 100;

pub fn validate_laps(laps: i64) -> Result<(), AppError> {
    if (MIN_LAPS..=MAX_LAPS).contains(&laps) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "laps must be between {} and {}, got {}",
            MIN_LAPS, MAX_LAPS, laps
        )))
    }
}

pub fn validate_race_create(req: &RaceCreate) -> Result<(), AppError> {
    validate_laps(req.laps)
}

/// Parses a caller-supplied store identifier. `message` is what the caller
/// sees on failure.
pub fn validate_object_id(raw: &str, message: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidIdentifier(message.to_string()))
}

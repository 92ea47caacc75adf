use axum::extract::{Path, rejection::PathRejection};
use serde::Deserialize;

use super::ApiError;

/// Raw query pairs. Kept as a list so repeated keys never reject the request.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct UserQuery(Vec<(String, String)>);

impl UserQuery {
    /// First `user_id` value, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == "user_id")
            .map(|(_, value)| value.as_str())
    }
}

/// Extracts `user_id`. Absent or empty is a validation error; a value that
/// is not an integer is an unclassified failure.
pub fn require_user_id(raw: Option<&str>) -> Result<i32, ApiError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("User ID is required!"))?;

    raw.parse::<i32>()
        .map_err(|e| ApiError::internal(format!("invalid user_id '{raw}': {e}")))
}

/// Resolves an id path segment. Only unsigned integers match the route;
/// anything else is reported as an unknown route.
pub fn path_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.ok()
        .map(|Path(id)| id)
        .filter(|id| *id >= 0)
        .ok_or_else(ApiError::route_not_found)
}

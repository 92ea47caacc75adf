use axum::Json;

use super::{ApiError, StatusMsg};

/// `GET /`
pub async fn index() -> Json<StatusMsg> {
    Json(StatusMsg {
        msg: "API is working!".to_string(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::route_not_found()
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

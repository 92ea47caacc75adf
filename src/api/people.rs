use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use std::sync::Arc;

use super::validation::path_id;
use super::{ApiError, AppState, PeopleResponse, PersonDto, PersonResponse};

/// `GET /people`
pub async fn list_people(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PeopleResponse>, ApiError> {
    let people = state.store().list_people().await?;
    Ok(Json(PeopleResponse {
        people: people.into_iter().map(PersonDto::from).collect(),
    }))
}

/// `GET /people/{id}`
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<PersonResponse>, ApiError> {
    let id = path_id(path)?;

    let person = state
        .store()
        .get_person(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Person not found"))?;

    Ok(Json(PersonResponse {
        person: PersonDto::from(person),
    }))
}

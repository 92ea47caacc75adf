use serde::Serialize;

use crate::db::{FavoritePeopleRow, FavoritePlanetRow};
use crate::entities::{people, planet, user};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StatusMsg {
    pub msg: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public view of a user. Password and activity flag are never exposed.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
}

impl From<user::Model> for UserDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PlanetDto {
    pub id: i32,
    pub name: String,
    pub diameter: Option<i32>,
    pub climate: Option<String>,
}

impl From<planet::Model> for PlanetDto {
    fn from(model: planet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            diameter: model.diameter,
            climate: model.climate,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PersonDto {
    pub id: i32,
    pub name: String,
    pub height: Option<i32>,
    pub mass: Option<i32>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
}

impl From<people::Model> for PersonDto {
    fn from(model: people::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            height: model.height,
            mass: model.mass,
            hair_color: model.hair_color,
            skin_color: model.skin_color,
            eye_color: model.eye_color,
            birth_year: model.birth_year,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FavoritePlanetDto {
    pub planet_id: i32,
    pub planet_name: Option<String>,
}

impl From<FavoritePlanetRow> for FavoritePlanetDto {
    fn from(row: FavoritePlanetRow) -> Self {
        Self {
            planet_id: row.planet_id,
            planet_name: row.planet_name,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FavoritePeopleDto {
    pub people_id: i32,
    pub people_name: Option<String>,
}

impl From<FavoritePeopleRow> for FavoritePeopleDto {
    fn from(row: FavoritePeopleRow) -> Self {
        Self {
            people_id: row.people_id,
            people_name: row.people_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PeopleResponse {
    pub people: Vec<PersonDto>,
}

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub person: PersonDto,
}

#[derive(Debug, Serialize)]
pub struct PlanetsResponse {
    pub planets: Vec<PlanetDto>,
}

#[derive(Debug, Serialize)]
pub struct PlanetResponse {
    pub planet: PlanetDto,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites_planets: Vec<FavoritePlanetDto>,
    pub favorites_people: Vec<FavoritePeopleDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_dto_hides_credentials() {
        let dto = UserDto::from(user::Model {
            id: 4,
            email: "leia@alderaan.gov".to_string(),
            password: "hunter2".to_string(),
            is_active: true,
        });

        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({"id": 4, "email": "leia@alderaan.gov"})
        );
    }

    #[test]
    fn test_person_dto_keeps_nulls() {
        let dto = PersonDto::from(people::Model {
            id: 2,
            name: "C-3PO".to_string(),
            height: Some(167),
            mass: None,
            hair_color: None,
            skin_color: Some("gold".to_string()),
            eye_color: Some("yellow".to_string()),
            birth_year: Some("112BBY".to_string()),
        });

        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({
                "id": 2,
                "name": "C-3PO",
                "height": 167,
                "mass": null,
                "hair_color": null,
                "skin_color": "gold",
                "eye_color": "yellow",
                "birth_year": "112BBY"
            })
        );
    }

    #[test]
    fn test_favorite_planet_dto_missing_planet() {
        let dto = FavoritePlanetDto::from(FavoritePlanetRow {
            id: 9,
            user_id: 1,
            planet_id: 42,
            planet_name: None,
        });

        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({"planet_id": 42, "planet_name": null})
        );
    }
}

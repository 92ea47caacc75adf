use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use holonet::api::AppState;
use holonet::config::Config;
use holonet::db::{NewPerson, NewPlanet, NewUser};
use http_body_util::BodyExt;
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

type App = NormalizePath<Router>;

async fn spawn_app() -> (Arc<AppState>, App) {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.observability.metrics_enabled = false;

    let state = holonet::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = holonet::api::router(state.clone());
    (state, app)
}

async fn send(app: &App, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn seed_user(state: &AppState, id: i32, email: &str) {
    state
        .store()
        .add_user(NewUser {
            id: Some(id),
            email: email.to_string(),
            password: "secret".to_string(),
            is_active: true,
        })
        .await
        .expect("failed to seed user");
}

async fn seed_planet(state: &AppState, id: i32, name: &str) {
    state
        .store()
        .add_planet(NewPlanet {
            id: Some(id),
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("failed to seed planet");
}

async fn seed_person(state: &AppState, id: i32, name: &str) {
    state
        .store()
        .add_person(NewPerson {
            id: Some(id),
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("failed to seed person");
}

#[tokio::test]
async fn test_index() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": "API is working!"}));
}

#[tokio::test]
async fn test_get_planet() {
    let (state, app) = spawn_app().await;
    state
        .store()
        .add_planet(NewPlanet {
            id: Some(1),
            name: "Tatooine".to_string(),
            diameter: Some(10465),
            climate: Some("arid".to_string()),
        })
        .await
        .unwrap();

    let expected = json!({
        "planet": {"id": 1, "name": "Tatooine", "diameter": 10465, "climate": "arid"}
    });

    let (status, body) = send(&app, Method::GET, "/planets/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (status, body) = send(&app, Method::GET, "/planets/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (status, body) = send(&app, Method::GET, "/planets/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Planet not found"}));

    let (status, body) = send(&app, Method::GET, "/planets/tatooine").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn test_list_planets() {
    let (state, app) = spawn_app().await;
    seed_planet(&state, 2, "Alderaan").await;
    seed_planet(&state, 1, "Tatooine").await;

    let (status, body) = send(&app, Method::GET, "/planets/").await;
    assert_eq!(status, StatusCode::OK);

    let planets = body["planets"].as_array().unwrap();
    assert_eq!(planets.len(), 2);
    assert_eq!(planets[0]["name"], "Tatooine");
    assert_eq!(planets[1]["id"], 2);
    assert!(planets[1]["diameter"].is_null());
    assert!(planets[1]["climate"].is_null());
}

#[tokio::test]
async fn test_people_endpoints() {
    let (state, app) = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/people").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"people": []}));

    state
        .store()
        .add_person(NewPerson {
            id: Some(1),
            name: "Luke Skywalker".to_string(),
            height: Some(172),
            mass: Some(77),
            hair_color: Some("blond".to_string()),
            skin_color: Some("fair".to_string()),
            eye_color: Some("blue".to_string()),
            birth_year: Some("19BBY".to_string()),
        })
        .await
        .unwrap();
    seed_person(&state, 2, "C-3PO").await;
    seed_person(&state, 3, "R2-D2").await;

    let (status, body) = send(&app, Method::GET, "/people").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["people"].as_array().unwrap().len(),
        state.store().list_people().await.unwrap().len()
    );

    let (status, body) = send(&app, Method::GET, "/people/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "person": {
                "id": 1,
                "name": "Luke Skywalker",
                "height": 172,
                "mass": 77,
                "hair_color": "blond",
                "skin_color": "fair",
                "eye_color": "blue",
                "birth_year": "19BBY"
            }
        })
    );

    let (status, body) = send(&app, Method::GET, "/people/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["person"]["id"], 3);
    assert!(body["person"]["mass"].is_null());

    let (status, body) = send(&app, Method::GET, "/people/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Person not found"}));
}

#[tokio::test]
async fn test_list_users_hides_credentials() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;
    seed_user(&state, 2, "leia@alderaan.gov").await;

    let (status, body) = send(&app, Method::GET, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "users": [
                {"id": 1, "email": "luke@tatooine.net"},
                {"id": 2, "email": "leia@alderaan.gov"}
            ]
        })
    );
}

#[tokio::test]
async fn test_favorite_planet_lifecycle() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 3, "han@corellia.net").await;
    seed_planet(&state, 5, "Hoth").await;

    let (status, body) = send(&app, Method::POST, "/favorite/planet/5?user_id=3").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"planet_id": 5, "planet_name": "Hoth"}));

    let (status, body) = send(&app, Method::POST, "/favorite/planet/5?user_id=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Planet already in favorites"}));

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "favorites_planets": [{"planet_id": 5, "planet_name": "Hoth"}],
            "favorites_people": []
        })
    );

    let (status, body) = send(&app, Method::DELETE, "/favorite/planet/5?user_id=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Favorite planet deleted!"}));

    let (status, body) = send(&app, Method::DELETE, "/favorite/planet/5?user_id=3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Favorite planet not found!"}));

    // The pair can be added again once removed.
    let (status, _) = send(&app, Method::POST, "/favorite/planet/5/?user_id=3").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_favorite_people_round_trip() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 2, "leia@alderaan.gov").await;
    seed_person(&state, 7, "Chewbacca").await;

    let (status, body) = send(&app, Method::POST, "/favorite/people/7?user_id=2").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"people_id": 7, "people_name": "Chewbacca"}));

    let (status, body) = send(&app, Method::POST, "/favorite/people/7?user_id=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Person already in favorites"}));

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=2").await;
    assert_eq!(status, StatusCode::OK);
    let people = body["favorites_people"].as_array().unwrap();
    assert!(people.iter().any(|p| p["people_id"] == 7));

    let (status, body) = send(&app, Method::DELETE, "/favorite/people/7?user_id=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Favorite person deleted!"}));

    let (status, body) = send(&app, Method::DELETE, "/favorite/people/7?user_id=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Favorite person not found!"}));
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;
    seed_user(&state, 2, "leia@alderaan.gov").await;
    seed_planet(&state, 1, "Tatooine").await;

    let (status, _) = send(&app, Method::POST, "/favorite/planet/1?user_id=1").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/favorite/planet/1?user_id=2").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, Method::DELETE, "/favorite/planet/1?user_id=1").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/users/favorites?user_id=2").await;
    assert_eq!(body["favorites_planets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_user_id_is_rejected_without_writing() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;
    seed_planet(&state, 1, "Tatooine").await;
    seed_person(&state, 1, "Luke Skywalker").await;

    let missing = json!({"error": "User ID is required!"});

    for (method, uri) in [
        (Method::POST, "/favorite/planet/1"),
        (Method::POST, "/favorite/people/1"),
        (Method::DELETE, "/favorite/planet/1"),
        (Method::DELETE, "/favorite/people/1"),
        (Method::GET, "/users/favorites"),
        (Method::POST, "/favorite/planet/1?user_id="),
    ] {
        let (status, body) = send(&app, method.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body, missing, "{method} {uri}");
    }

    let favorites = state.favorites.list_for_user(1).await.unwrap();
    assert!(favorites.planets.is_empty());
    assert!(favorites.people.is_empty());
}

#[tokio::test]
async fn test_repeated_user_id_uses_first_value() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;
    seed_user(&state, 2, "leia@alderaan.gov").await;
    seed_planet(&state, 1, "Tatooine").await;

    let (status, _) = send(&app, Method::POST, "/favorite/planet/1?user_id=1&user_id=2").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=2&user_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"favorites_planets": [], "favorites_people": []})
    );

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=1&user_id=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorites_planets"][0]["planet_id"], 1);
}

#[tokio::test]
async fn test_negative_path_id_is_unknown_route() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;

    let not_found = json!({"error": "Not Found"});

    for (method, uri) in [
        (Method::GET, "/planets/-1"),
        (Method::GET, "/people/-1"),
        (Method::POST, "/favorite/planet/-1?user_id=1"),
        (Method::POST, "/favorite/people/-1?user_id=1"),
        (Method::DELETE, "/favorite/planet/-1?user_id=1"),
    ] {
        let (status, body) = send(&app, method.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body, not_found, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_favorites_with_missing_rows_have_null_names() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;
    seed_planet(&state, 5, "Hoth").await;
    seed_person(&state, 7, "Chewbacca").await;

    let (status, _) = send(&app, Method::POST, "/favorite/planet/5?user_id=1").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/favorite/people/7?user_id=1").await;
    assert_eq!(status, StatusCode::CREATED);

    let conn = &state.store().conn;
    conn.execute_unprepared("PRAGMA foreign_keys = OFF")
        .await
        .unwrap();
    conn.execute_unprepared("DELETE FROM planet WHERE id = 5")
        .await
        .unwrap();
    conn.execute_unprepared("DELETE FROM people WHERE id = 7")
        .await
        .unwrap();

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "favorites_planets": [{"planet_id": 5, "planet_name": null}],
            "favorites_people": [{"people_id": 7, "people_name": null}]
        })
    );
}

#[tokio::test]
async fn test_database_error_text_is_not_repeated() {
    let (state, app) = spawn_app().await;
    seed_user(&state, 1, "luke@tatooine.net").await;

    let (status, body) = send(&app, Method::POST, "/favorite/planet/99?user_id=1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to insert favorite planet"), "{message}");
    assert_eq!(
        message.matches("FOREIGN KEY constraint failed").count(),
        1,
        "{message}"
    );

    let (_, body) = send(&app, Method::GET, "/users/favorites?user_id=1").await;
    assert_eq!(body["favorites_planets"], json!([]));
}

#[tokio::test]
async fn test_favorites_of_unknown_user_are_empty() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=404").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"favorites_planets": [], "favorites_people": []})
    );
}

#[tokio::test]
async fn test_malformed_user_id_is_internal_error() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/users/favorites?user_id=luke").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("luke"));
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/starships").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));

    let (status, body) = send(&app, Method::PUT, "/people").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method Not Allowed"}));

    let (status, _) = send(&app, Method::GET, "/favorite/planet/1?user_id=1").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_responses_are_json() {
    let (_, app) = spawn_app().await;

    for uri in ["/", "/planets", "/people/1", "/users/favorites"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert_eq!(content_type, mime::APPLICATION_JSON.as_ref(), "{uri}");
    }
}

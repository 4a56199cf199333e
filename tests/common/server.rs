//! Test server lifecycle management
//!
//! One in-process HTTP server answers both the movie database routes
//! (under `/3`) and the auth routes (under `/auth`), with canned data from
//! `fixtures.rs`.

use super::constants::*;
use super::fixtures::test_movies;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

type Params = Query<HashMap<String, String>>;
type JsonResult = Result<Json<Value>, StatusCode>;

/// Mock services on a random local port. Shuts down when dropped.
pub struct TestServer {
    /// Base URL of the server (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, make_app())
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn tmdb_base_url(&self) -> String {
        format!("{}/3", self.base_url)
    }

    pub fn auth_base_url(&self) -> String {
        format!("{}/auth", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn make_app() -> Router {
    Router::new()
        .route("/3/trending/movie/week", get(trending))
        .route("/3/movie/popular", get(popular))
        .route("/3/movie/top_rated", get(top_rated))
        .route("/3/movie/upcoming", get(upcoming))
        .route("/3/movie/{id}", get(movie_details))
        .route("/3/genre/movie/list", get(genres))
        .route("/3/discover/movie", get(discover))
        .route("/3/search/movie", get(search))
        .route("/auth/login", post(login))
}

// ============================================================================
// Movie database
// ============================================================================

fn check_api_key(params: &HashMap<String, String>) -> Result<(), StatusCode> {
    match params.get("api_key") {
        Some(key) if key == TEST_API_KEY => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn movie_by_id(id: u64) -> Option<Value> {
    test_movies()
        .into_iter()
        .find(|movie| movie["id"].as_u64() == Some(id))
}

fn page_of(ids: &[u64]) -> Json<Value> {
    let results: Vec<Value> = ids.iter().filter_map(|id| movie_by_id(*id)).collect();
    page(results)
}

fn page(results: Vec<Value>) -> Json<Value> {
    let total_results = results.len();
    Json(json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": total_results
    }))
}

async fn trending(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    Ok(page_of(&[INCEPTION_ID, FIGHT_CLUB_ID]))
}

async fn popular(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    Ok(page_of(&[PULP_FICTION_ID, FORREST_GUMP_ID]))
}

async fn top_rated(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    Ok(page_of(&[PULP_FICTION_ID, FORREST_GUMP_ID, FIGHT_CLUB_ID]))
}

async fn upcoming(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    Ok(page_of(&[UNTITLED_ID]))
}

async fn movie_details(Path(id): Path<u64>, Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    let mut movie = movie_by_id(id).ok_or(StatusCode::NOT_FOUND)?;
    let genres: Vec<Value> = movie["genre_ids"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|genre_id| json!({"id": genre_id, "name": genre_name(genre_id.as_u64().unwrap_or(0))}))
        .collect();

    let details = movie.as_object_mut().ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    details.remove("genre_ids");
    details.insert("genres".to_string(), json!(genres));
    details.insert(
        "runtime".to_string(),
        if id == FIGHT_CLUB_ID { json!(139) } else { json!(null) },
    );
    details.insert("tagline".to_string(), json!("A tagline."));
    details.insert("status".to_string(), json!("Released"));
    Ok(Json(movie))
}

fn genre_name(id: u64) -> &'static str {
    match id {
        12 => "Adventure",
        18 => "Drama",
        28 => "Action",
        35 => "Comedy",
        53 => "Thriller",
        80 => "Crime",
        878 => "Science Fiction",
        10749 => "Romance",
        _ => "Unknown",
    }
}

async fn genres(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    let genres: Vec<Value> = [28, 12, 35, 80, 18]
        .into_iter()
        .map(|id| json!({"id": id, "name": genre_name(id)}))
        .collect();
    Ok(Json(json!({ "genres": genres })))
}

async fn discover(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    let genre_id: u64 = params
        .get("with_genres")
        .and_then(|id| id.parse().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let results = test_movies()
        .into_iter()
        .filter(|movie| {
            movie["genre_ids"]
                .as_array()
                .map(|ids| ids.iter().any(|id| id.as_u64() == Some(genre_id)))
                .unwrap_or(false)
        })
        .collect();
    Ok(page(results))
}

async fn search(Query(params): Params) -> JsonResult {
    check_api_key(&params)?;
    let query = params
        .get("query")
        .map(|query| query.to_lowercase())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let results = test_movies()
        .into_iter()
        .filter(|movie| {
            movie["title"]
                .as_str()
                .map(|title| title.to_lowercase().contains(&query))
                .unwrap_or(false)
        })
        .collect();
    Ok(page(results))
}

// ============================================================================
// Auth
// ============================================================================

async fn login(Json(body): Json<Value>) -> JsonResult {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let (expected_pass, response) = match username {
        TEST_USER => (
            TEST_PASS,
            json!({
                "id": TEST_USER_ID,
                "username": TEST_USER,
                "email": "emily.johnson@x.dummyjson.com",
                "firstName": "Emily",
                "lastName": "Johnson",
                "gender": "female",
                "image": "https://dummyjson.com/icon/emilys/128",
                "accessToken": TEST_USER_TOKEN,
                "refreshToken": "refresh-token"
            }),
        ),
        OTHER_USER => (
            OTHER_PASS,
            json!({
                "id": OTHER_USER_ID,
                "username": OTHER_USER,
                "email": "michael.williams@x.dummyjson.com",
                "firstName": "Michael",
                "lastName": "Williams",
                "gender": "male",
                "image": "https://dummyjson.com/icon/michaelw/128",
                "accessToken": "access-token-michaelw"
            }),
        ),
        LEGACY_USER => (
            LEGACY_PASS,
            json!({
                "username": LEGACY_USER,
                "email": "",
                "token": LEGACY_USER_TOKEN
            }),
        ),
        BROKEN_USER => return Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => return Err(StatusCode::NOT_FOUND),
    };

    if password != expected_pass {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(response))
}

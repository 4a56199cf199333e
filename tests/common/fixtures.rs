//! Catalog records and on-disk client environments for tests.

use super::constants::*;
use super::server::TestServer;
use serde_json::{json, Value};
use streambox_client::config::{AppConfig, CliConfig, SecretBackendKind};
use streambox_client::theme::ThemeMode;
use streambox_client::{AppContext, AppServices, TmdbClient};
use tempfile::TempDir;

/// One movie in the list-endpoint shape.
pub fn movie_json(
    id: u64,
    title: &str,
    genre_ids: &[u64],
    release_date: Option<&str>,
    vote_average: f64,
) -> Value {
    json!({
        "adult": false,
        "backdrop_path": format!("/backdrop-{}.jpg", id),
        "genre_ids": genre_ids,
        "id": id,
        "original_language": "en",
        "original_title": title,
        "overview": format!("Overview of {}.", title),
        "popularity": 61.4,
        "poster_path": format!("/poster-{}.jpg", id),
        "release_date": release_date,
        "title": title,
        "video": false,
        "vote_average": vote_average,
        "vote_count": 1000
    })
}

/// Every movie the mock catalog knows about.
pub fn test_movies() -> Vec<Value> {
    vec![
        movie_json(FIGHT_CLUB_ID, "Fight Club", &[18], Some("1999-10-15"), 8.433),
        movie_json(PULP_FICTION_ID, "Pulp Fiction", &[53, 80], Some("1994-09-10"), 8.5),
        movie_json(
            FORREST_GUMP_ID,
            "Forrest Gump",
            &[35, 18, 10749],
            Some("1994-06-23"),
            8.47,
        ),
        movie_json(INCEPTION_ID, "Inception", &[28, 878, 12], Some("2010-07-15"), 8.369),
        json!({
            "id": UNTITLED_ID,
            "title": "Untitled Project",
            "overview": null,
            "poster_path": null,
            "backdrop_path": null,
            "release_date": "",
            "vote_average": 0.0,
            "genre_ids": []
        }),
    ]
}

/// A client data directory wired to a running [`TestServer`].
///
/// Starting several contexts from the same env simulates app restarts.
pub struct TestEnv {
    pub config: AppConfig,
    _data_dir: TempDir,
}

impl TestEnv {
    pub fn new(server: &TestServer) -> Self {
        let data_dir = TempDir::new().expect("Failed to create data dir");
        let cli = CliConfig {
            data_dir: Some(data_dir.path().to_path_buf()),
            tmdb_api_key: Some(TEST_API_KEY.to_string()),
            tmdb_base_url: Some(server.tmdb_base_url()),
            auth_base_url: Some(server.auth_base_url()),
            request_timeout_sec: 5,
            secret_backend: SecretBackendKind::File,
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).expect("Failed to resolve config");

        Self {
            config,
            _data_dir: data_dir,
        }
    }

    /// Fresh handles on the storage files, as after a process restart.
    pub fn services(&self) -> AppServices {
        AppServices::from_config(&self.config).expect("Failed to open services")
    }

    pub async fn start(&self) -> AppContext {
        AppContext::start(self.services(), ThemeMode::Light).await
    }

    pub fn catalog(&self) -> TmdbClient {
        TmdbClient::new(
            self.config
                .tmdb_settings()
                .expect("Missing catalog settings"),
        )
        .expect("Failed to build catalog client")
    }
}

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use tracing::error;

use crate::library::LibraryError;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub songs: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let songs = state
        .library
        .scan()
        .map(|scan| scan.songs.len())
        .unwrap_or(0);
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        songs,
    };
    Json(stats)
}

async fn get_songs(State(library): State<SharedLibrary>) -> Response {
    match library.scan() {
        Ok(scan) => Json(scan.songs).into_response(),
        Err(err) => {
            error!("Failed to scan analysis data directory: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_analysis(
    State(library): State<SharedLibrary>,
    Path(song_title): Path<String>,
) -> Response {
    match library.analyze(&song_title) {
        Ok(result) => Json(result).into_response(),
        Err(err @ LibraryError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
    }
}

impl ServerState {
    fn new(config: ServerConfig, library: SharedLibrary) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            library,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid allowed origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    // Credentialed CORS cannot use wildcards, so methods and headers mirror the
    // preflight request instead.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn make_app(config: ServerConfig, library: SharedLibrary) -> Result<Router> {
    let state = ServerState::new(config.clone(), library);

    let api_routes: Router = Router::new()
        .route("/songs", get(get_songs))
        .route("/analyze/{song_title}", get(get_analysis))
        .with_state(state.clone());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router.nest("/api", api_routes);

    app = app.layer(cors_layer(&config.allowed_origins)?);
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    library: SharedLibrary,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
        allowed_origins,
    };
    let app = make_app(config, library)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    Ok(axum::serve(listener, app).await?)
}

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use common::engine::{Difficulty, Mark};
use common::{GameId, log};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::game_registry::GameRegistry;
use crate::game_session::GameSnapshot;
use crate::server_config::ServerConfig;

#[derive(Clone)]
pub struct WebServerState {
    pub registry: GameRegistry,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
struct CreateGameRequest {
    #[serde(default = "default_human_symbol")]
    human_symbol: String,
    #[serde(default = "default_ai_difficulty")]
    ai_difficulty: String,
}

fn default_human_symbol() -> String {
    "X".to_string()
}

fn default_ai_difficulty() -> String {
    "medium".to_string()
}

#[derive(Serialize)]
struct CreateGameResponse {
    game_id: String,
    state: GameSnapshot,
}

#[derive(Serialize)]
struct StateResponse {
    state: GameSnapshot,
}

#[derive(Deserialize)]
struct MoveRequest {
    row: i64,
    col: i64,
}

#[derive(Serialize)]
struct MoveOutcome {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct MoveResponse {
    result: MoveOutcome,
    state: GameSnapshot,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(detail: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { detail }))
}

fn game_not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: "Game not found".to_string(),
        }),
    )
}

pub async fn run_web_server(registry: GameRegistry, config: &ServerConfig) {
    let state = WebServerState {
        registry,
        api_key: config.api_key.clone(),
    };
    let app = build_router(state);

    let addr = config.bind_address.clone();
    log!("Web server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind web server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Web server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    log!("Shutdown signal received, stopping web server...");
}

pub fn build_router(state: WebServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/games", post(create_game))
        .route("/games/{game_id}/state", get(get_state))
        .route("/games/{game_id}/move", post(make_move))
        .route("/games/{game_id}/reset", post(reset_game))
        .route("/games/{game_id}", delete(delete_game))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        // The index stays reachable without a key.
        .route("/", get(index))
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct IndexResponse {
    name: &'static str,
    endpoints: &'static [&'static str],
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "tictactoe server",
        endpoints: &[
            "POST /games",
            "GET /games/{game_id}/state",
            "POST /games/{game_id}/move",
            "POST /games/{game_id}/reset",
            "DELETE /games/{game_id}",
        ],
    })
}

async fn require_api_key(
    State(state): State<WebServerState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(ref expected) = state.api_key {
        let provided = request
            .headers()
            .get("x-api-key")
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    detail: "Invalid or missing API key".to_string(),
                }),
            )
                .into_response();
        }
    }
    next.run(request).await
}

async fn create_game(
    State(state): State<WebServerState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let human_mark: Mark = request.human_symbol.parse().map_err(bad_request)?;
    let difficulty: Difficulty = request.ai_difficulty.parse().map_err(bad_request)?;

    let (game_id, snapshot) = state
        .registry
        .create_game(human_mark, difficulty)
        .await
        .map_err(bad_request)?;

    Ok(Json(CreateGameResponse {
        game_id: game_id.to_string(),
        state: snapshot,
    }))
}

async fn get_state(
    State(state): State<WebServerState>,
    Path(game_id): Path<String>,
) -> Result<Json<StateResponse>, ApiError> {
    let session = state
        .registry
        .get(&GameId::new(game_id))
        .await
        .ok_or_else(game_not_found)?;

    let mut session = session.lock().await;
    session.touch();
    Ok(Json(StateResponse {
        state: session.snapshot(),
    }))
}

async fn make_move(
    State(state): State<WebServerState>,
    Path(game_id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let session = state
        .registry
        .get(&GameId::new(game_id))
        .await
        .ok_or_else(game_not_found)?;

    let mut session = session.lock().await;

    // Negative coordinates never fit the grid; report them the same way
    // as any other out-of-range move instead of failing deserialization.
    let rejection = match (usize::try_from(request.row), usize::try_from(request.col)) {
        (Ok(row), Ok(col)) => session.human_move(row, col).err().map(|e| e.to_string()),
        _ => Some(format!(
            "Position ({}, {}) is out of bounds",
            request.row, request.col
        )),
    };

    let result = match rejection {
        None => MoveOutcome {
            success: true,
            message: "Move successful".to_string(),
        },
        Some(message) => MoveOutcome {
            success: false,
            message,
        },
    };

    Ok(Json(MoveResponse {
        result,
        state: session.snapshot(),
    }))
}

async fn reset_game(
    State(state): State<WebServerState>,
    Path(game_id): Path<String>,
) -> Result<Json<MoveResponse>, ApiError> {
    let session = state
        .registry
        .get(&GameId::new(game_id))
        .await
        .ok_or_else(game_not_found)?;

    let mut session = session.lock().await;
    session.reset();

    Ok(Json(MoveResponse {
        result: MoveOutcome {
            success: true,
            message: "Game reset".to_string(),
        },
        state: session.snapshot(),
    }))
}

async fn delete_game(
    State(state): State<WebServerState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.registry.remove(&GameId::new(game_id)).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(game_not_found())
    }
}

mod config;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use config::Settings;
use sanma_core::{
    calculate_shanten, can_kan, can_pon, chi_options, choose_discard, concealed_kan_options,
    evaluate_hand, score as calc_score, CoreError, HandRequest, HandResult, Ruleset,
    ScoreRequest, ScoreResult, Tile,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
struct AppState {
    rules: Ruleset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let state = Arc::new(AppState {
        rules: settings.rules,
    });

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    info!(addr = %settings.addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/score", post(score))
        .route("/api/hand", post(hand))
        .route("/api/shanten", post(shanten))
        .route("/api/calls", post(calls))
        .route("/api/discard", post(discard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn score(
    State(state): State<Arc<AppState>>,
    Json(mut req): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, ApiError> {
    req.ruleset.get_or_insert_with(|| state.rules.clone());
    let result = calc_score(&req)?.ok_or(ApiError::NotWinning)?;
    Ok(Json(result))
}

async fn hand(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HandRequest>,
) -> Result<Json<HandResult>, ApiError> {
    let rules = req.ruleset.as_ref().unwrap_or(&state.rules);
    let result = evaluate_hand(&req.tiles, &req.context, rules)?.ok_or(ApiError::NotWinning)?;
    Ok(Json(result))
}

#[derive(Deserialize)]
struct TilesBody {
    tiles: Vec<Tile>,
}

#[derive(Debug, Serialize)]
struct ShantenResponse {
    shanten: i8,
}

async fn shanten(Json(body): Json<TilesBody>) -> Result<Json<ShantenResponse>, ApiError> {
    let shanten = calculate_shanten(&body.tiles)?;
    Ok(Json(ShantenResponse { shanten }))
}

#[derive(Deserialize)]
struct CallsBody {
    tiles: Vec<Tile>,
    target: Tile,
}

#[derive(Debug, Serialize)]
struct CallsResponse {
    pon: bool,
    kan: bool,
    chi: Vec<[Tile; 3]>,
    concealed_kan: Vec<Tile>,
}

async fn calls(Json(body): Json<CallsBody>) -> Json<CallsResponse> {
    Json(CallsResponse {
        pon: can_pon(&body.tiles, body.target),
        kan: can_kan(&body.tiles, body.target),
        chi: chi_options(&body.tiles, body.target),
        concealed_kan: concealed_kan_options(&body.tiles),
    })
}

#[derive(Deserialize)]
struct DiscardBody {
    tiles: Vec<Tile>,
    /// Discards of the player being defended against.
    #[serde(default)]
    safe: HashSet<Tile>,
}

#[derive(Debug, Serialize)]
struct DiscardResponse {
    index: usize,
    tile: Tile,
}

async fn discard(Json(body): Json<DiscardBody>) -> Result<Json<DiscardResponse>, ApiError> {
    let index = choose_discard(&body.tiles, &body.safe)?;
    Ok(Json(DiscardResponse {
        index,
        tile: body.tiles[index],
    }))
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    NotWinning,
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Invalid(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotWinning => {
                (StatusCode::UNPROCESSABLE_ENTITY, "not a winning hand").into_response()
            }
        }
    }
}

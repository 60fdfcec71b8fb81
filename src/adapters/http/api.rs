//! JSON odds endpoint.
//!
//! `GET /api/odds?region=<csv>` answers `{success: true, games}` with
//! HTTP 200, or `{success: false, error}` with HTTP 500 when the odds
//! board fails for any reason. A repeated `region` key is joined with
//! commas, so `?region=eu&region=us` asks for `eu,us`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use super::AppState;
use crate::domain::game::SummarizedGame;

/// Comma-joined `region` values of a query string, `None` when absent.
pub fn region_param(pairs: &[(String, String)]) -> Option<String> {
  let regions: Vec<&str> = pairs
    .iter()
    .filter(|(key, _)| key == "region")
    .map(|(_, value)| value.trim())
    .filter(|value| !value.is_empty())
    .collect();
  (!regions.is_empty()).then(|| regions.join(","))
}

/// Success body.
#[derive(Debug, Serialize)]
pub struct OddsPayload {
  pub success: bool,
  pub games: Vec<SummarizedGame>,
}

/// Failure body.
#[derive(Debug, Serialize)]
pub struct OddsFailure {
  pub success: bool,
  pub error: String,
}

/// `GET /api/odds`
pub async fn get_odds(
  State(state): State<AppState>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
  let region = region_param(&pairs);
  match state.board.ranked_games(region.as_deref()).await {
    Ok(games) => (
      StatusCode::OK,
      Json(OddsPayload {
        success: true,
        games,
      }),
    )
      .into_response(),
    Err(e) => {
      error!(error = %e, "API /odds error");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(OddsFailure {
          success: false,
          error: e.to_string(),
        }),
      )
        .into_response()
    }
  }
}

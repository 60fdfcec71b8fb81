//! Integration Tests - End-to-end Odds Service Testing
//!
//! Drives the real axum router over a local socket. The odds provider
//! is either a mockall mock of the port, or the real `OddsApiClient`
//! pointed at a fake provider served from the same test process.

use std::sync::Arc;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use mockall::mock;
use serde_json::{json, Value};

use betstats_odds::adapters::api::OddsApiClient;
use betstats_odds::adapters::http::{router, AppState};
use betstats_odds::adapters::metrics::HealthState;
use betstats_odds::config::ProviderConfig;
use betstats_odds::domain::game::{Bookmaker, Game, Market, Outcome};
use betstats_odds::error::OddsError;
use betstats_odds::ports::odds_provider::{OddsProvider, OddsQuery};
use betstats_odds::usecases::OddsBoard;

// ---- Mock Definitions ----

mock! {
    pub Provider {}

    #[async_trait::async_trait]
    impl OddsProvider for Provider {
        async fn fetch_odds(&self, query: &OddsQuery) -> Result<Vec<Game>, OddsError>;
    }
}

// ---- Helpers ----

fn game(id: &str, home: &str, prices: &[f64]) -> Game {
    let outcomes = prices
        .iter()
        .enumerate()
        .map(|(i, p)| Outcome::new(format!("{home}#{i}"), *p))
        .collect();
    Game {
        id: Some(id.to_string()),
        home_team: Some(home.to_string()),
        away_team: Some("Visitors".to_string()),
        bookmakers: vec![Bookmaker::with_markets(vec![Market::new("h2h", outcomes)])],
        ..Game::default()
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_service(provider: Arc<dyn OddsProvider>) -> String {
    let board = Arc::new(OddsBoard::new(provider, &ProviderConfig::default()));
    serve(router(AppState {
        board,
        health: Arc::new(HealthState::new()),
    }))
    .await
}

// ---- Integration Tests ----

#[tokio::test]
async fn test_odds_endpoint_ranks_games() {
    let mut provider = MockProvider::new();
    provider
        .expect_fetch_odds()
        .withf(|q| q.region == "us" && q.sport == "soccer")
        .times(1)
        .returning(|_| {
            Ok(vec![
                game("draw_heavy", "Alpha", &[3.2, 3.4]),
                Game {
                    id: None,
                    home_team: Some("Gamma".to_string()),
                    away_team: Some("Delta".to_string()),
                    ..Game::default()
                },
                game("favourite", "Beta", &[1.2, 1.1]),
            ])
        });

    let base = spawn_service(Arc::new(provider)).await;
    let resp = reqwest::get(format!("{base}/api/odds?region=us")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    let games = body["games"].as_array().unwrap();
    assert_eq!(games.len(), 3);

    assert_eq!(games[0]["id"], "favourite");
    assert_eq!(games[0]["best_outcome"]["price"], json!(1.2));
    assert_eq!(games[0]["confidence"], json!(83.3));
    assert_eq!(games[0]["league"], "soccer");

    assert_eq!(games[1]["id"], "draw_heavy");
    assert_eq!(games[1]["confidence"], json!(29.4));

    assert_eq!(games[2]["id"], "Gamma_vs_Delta_unknown");
    assert!(games[2]["best_outcome"].is_null());
    assert!(games[2]["confidence"].is_null());
    assert_eq!(games[2]["bookmakers"], json!([]));
}

#[tokio::test]
async fn test_odds_endpoint_defaults_region() {
    let mut provider = MockProvider::new();
    provider
        .expect_fetch_odds()
        .withf(|q| q.region == "eu,sa" && q.markets == ["h2h", "spreads", "totals"])
        .times(2)
        .returning(|_| Ok(Vec::new()));

    let base = spawn_service(Arc::new(provider)).await;

    let resp = reqwest::get(format!("{base}/api/odds")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "games": []}));

    let resp = reqwest::get(format!("{base}/api/odds?region=")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_odds_endpoint_joins_repeated_region() {
    let mut provider = MockProvider::new();
    provider
        .expect_fetch_odds()
        .withf(|q| q.region == "eu,us")
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let base = spawn_service(Arc::new(provider)).await;

    let resp = reqwest::get(format!("{base}/api/odds?region=eu&region=us"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "games": []}));
}

#[tokio::test]
async fn test_odds_endpoint_reports_missing_key() {
    let mut provider = MockProvider::new();
    provider
        .expect_fetch_odds()
        .returning(|_| Err(OddsError::MissingApiKey));

    let base = spawn_service(Arc::new(provider)).await;
    let resp = reqwest::get(format!("{base}/api/odds")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("ODDS_API_KEY"));
    assert!(body.get("games").is_none());
}

#[tokio::test]
async fn test_home_page_hides_error_details() {
    let mut provider = MockProvider::new();
    provider.expect_fetch_odds().returning(|_| {
        Err(OddsError::Upstream {
            status: 401,
            body: "secret diagnostics".to_string(),
        })
    });

    let base = spawn_service(Arc::new(provider)).await;
    let html = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
    assert!(html.contains("Erro ao buscar odds."));
    assert!(!html.contains("secret diagnostics"));
}

#[tokio::test]
async fn test_home_page_renders_ranked_cards() {
    let mut provider = MockProvider::new();
    provider
        .expect_fetch_odds()
        .returning(|_| Ok(vec![game("g1", "Alpha", &[1.8, 2.1]), game("g2", "Beta", &[1.5])]));

    let base = spawn_service(Arc::new(provider)).await;
    let html = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
    assert!(html.contains("Confiança: 66.7%"));
    assert!(html.contains("Alpha#1 2.10"));
    assert!(html.find("Beta").unwrap() < html.find("Alpha").unwrap());
}

#[tokio::test]
async fn test_history_and_probes() {
    let base = spawn_service(Arc::new(MockProvider::new())).await;

    let resp = reqwest::get(format!("{base}/history")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Histórico"));

    let resp = reqwest::get(format!("{base}/live")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = reqwest::get(format!("{base}/ready")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---- Real client against a fake provider ----

async fn fake_provider(headers: HeaderMap, Query(params): Query<Vec<(String, String)>>) -> (StatusCode, Json<Value>) {
    let param = |name: &str| {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };

    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad key"})));
    }
    assert_eq!(param("regions"), Some("eu,sa"));
    assert_eq!(param("markets"), Some("h2h,spreads,totals"));
    assert_eq!(param("oddsFormat"), Some("decimal"));
    assert_eq!(param("dateFormat"), Some("iso"));

    (
        StatusCode::OK,
        Json(json!([
            {
                "id": "evt1",
                "sport_key": "soccer_brazil_campeonato",
                "commence_time": "2024-05-01T18:00:00Z",
                "home_team": "Flamengo",
                "away_team": "Palmeiras",
                "bookmakers": [
                    {"key": "b1", "markets": [{"key": "h2h", "outcomes": [
                        {"name": "Flamengo", "price": 1.8},
                        {"name": "Palmeiras", "price": 2.1}
                    ]}]},
                    {"key": "b2", "markets": [{"key": "h2h", "outcomes": [
                        {"name": "Flamengo", "price": 1.9}
                    ]}]}
                ]
            },
            {"id": "evt2", "home_team": "Santos", "away_team": "Gremio"}
        ])),
    )
}

async fn spawn_with_fake_provider(api_key: Option<&str>) -> String {
    let provider_base = serve(Router::new().route("/v4/sports/soccer/odds", get(fake_provider))).await;
    let config = ProviderConfig {
        base_url: format!("{provider_base}/v4"),
        api_key: api_key.map(str::to_string),
        ..ProviderConfig::default()
    };
    let client = OddsApiClient::new(config).unwrap();
    spawn_service(Arc::new(client)).await
}

#[tokio::test]
async fn test_real_client_end_to_end() {
    let base = spawn_with_fake_provider(Some("test-key")).await;

    let resp = reqwest::get(format!("{base}/api/odds")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let games = body["games"].as_array().unwrap();

    assert_eq!(games[0]["id"], "evt1");
    assert_eq!(games[0]["best_outcome"], json!({"name": "Palmeiras", "price": 2.1}));
    assert_eq!(games[0]["confidence"], json!(47.6));
    assert_eq!(games[0]["league"], "soccer_brazil_campeonato");
    assert_eq!(games[0]["commence_time"], "2024-05-01T18:00:00Z");
    assert_eq!(games[0]["bookmakers"].as_array().unwrap().len(), 2);

    assert_eq!(games[1]["id"], "evt2");
    assert!(games[1]["confidence"].is_null());
}

#[tokio::test]
async fn test_real_client_upstream_failure_is_echoed() {
    let base = spawn_with_fake_provider(Some("wrong-key")).await;

    let resp = reqwest::get(format!("{base}/api/odds")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("HTTP 401"));
}

#[tokio::test]
async fn test_real_client_without_key_never_calls_provider() {
    let base = spawn_with_fake_provider(None).await;

    let resp = reqwest::get(format!("{base}/api/odds")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        json!("ODDS_API_KEY missing - set it in the environment")
    );
}

//! Server-rendered pages.
//!
//! `/` lists the ranked games as cards; `/history` is a static
//! placeholder. Rendering only: no computation beyond formatting.
//! Failures show a generic message, never the error itself.

use std::fmt::Write as _;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use chrono::{DateTime, Utc};

use super::AppState;
use crate::domain::game::SummarizedGame;

const TITLE: &str = "BetStats+ — Odds &amp; Probabilidades";
const PLACEHOLDER: &str = "—";

/// `GET /`
pub async fn home(State(state): State<AppState>) -> (StatusCode, Html<String>) {
  match state.board.ranked_games(None).await {
    Ok(games) => (StatusCode::OK, Html(render_home(&games))),
    // Already logged by the odds board.
    Err(_) => (
      StatusCode::OK,
      Html(layout(TITLE, r#"<p class="error">Erro ao buscar odds.</p>"#)),
    ),
  }
}

/// `GET /history`
pub async fn history() -> Html<String> {
  Html(layout(
    "Histórico de previsões",
    "<p>Configure um banco de dados para armazenar os resultados das previsões \
     e exibir métricas de acerto.</p>",
  ))
}

/// Render the ranked game list.
pub fn render_home(games: &[SummarizedGame]) -> String {
  let mut body = String::from(
    "<nav><a href=\"/history\">Histórico</a></nav>\n\
     <h2>Jogos com maior confiança</h2>\n<div class=\"grid\">\n",
  );
  for game in games {
    body.push_str(&render_card(game));
  }
  body.push_str("</div>\n");
  layout(TITLE, &body)
}

/// One game card.
pub fn render_card(game: &SummarizedGame) -> String {
  let best = game.best_outcome.as_ref().map_or_else(
    || PLACEHOLDER.to_string(),
    |o| format!("{} {:.2}", escape(&o.name), o.price),
  );
  let confidence = game
    .confidence
    .map_or_else(|| PLACEHOLDER.to_string(), |c| c.to_string());

  let mut card = String::new();
  let _ = write!(
    card,
    "<div class=\"card\">\
     <div class=\"league\">{league}</div>\
     <div class=\"teams\">{home} <span>x</span> {away}</div>\
     <div class=\"kickoff\">{kickoff}</div>\
     <div class=\"label\">Melhor aposta</div>\
     <div class=\"best\">{best}</div>\
     <div class=\"confidence\">Confiança: {confidence}%</div>\
     </div>\n",
    league = escape(&game.league),
    home = escape(&game.home),
    away = escape(&game.away),
    kickoff = format_kickoff(game.commence_time),
  );
  card
}

/// Kickoff as `dd/MM/yyyy HH:mm` (UTC).
pub fn format_kickoff(time: Option<DateTime<Utc>>) -> String {
  time.map_or_else(
    || PLACEHOLDER.to_string(),
    |t| t.format("%d/%m/%Y %H:%M").to_string(),
  )
}

/// Minimal HTML escaping for text and attribute content.
pub fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
     <body>\n<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n"
  )
}

const STYLE: &str = "body{background:#0b1220;color:#e6eef3;font-family:Inter,system-ui,sans-serif}\
main{max-width:72rem;margin:0 auto;padding:1.5rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr));gap:1rem}\
.card{background:#171717;border-radius:1rem;padding:1rem}\
.league,.label{font-size:.875rem;color:#d1d5db}.teams{font-weight:700;font-size:1.125rem}\
.kickoff{font-size:.75rem;color:#9ca3af}.best{font-weight:800;font-size:1.25rem}\
.confidence{font-size:.875rem;color:#4ade80}.error{color:#f87171}a{color:#e6eef3}";

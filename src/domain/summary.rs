//! Game summarization and confidence ranking.
//!
//! Turns provider games into `SummarizedGame`s and orders them so the
//! most confident pick comes first.

use chrono::SecondsFormat;

use super::game::{Game, GameId, SummarizedGame};
use super::odds::{best_outcome, confidence_pct};

/// League reported when the provider omits `sport_key`.
pub const DEFAULT_LEAGUE: &str = "soccer";

/// Summarize a single game.
///
/// Pure: the same game always yields the same summary.
pub fn summarize_game(game: &Game) -> SummarizedGame {
    let best = best_outcome(game).cloned();
    let confidence = best.as_ref().and_then(|o| confidence_pct(o.price));

    SummarizedGame {
        id: game.id.clone().unwrap_or_else(|| synthesize_id(game)),
        home: game.home_team.clone().unwrap_or_else(|| "Home".to_string()),
        away: game.away_team.clone().unwrap_or_else(|| "Away".to_string()),
        commence_time: game.commence_time,
        best_outcome: best,
        confidence,
        bookmakers: game.bookmakers.clone(),
        league: game
            .sport_key
            .clone()
            .unwrap_or_else(|| DEFAULT_LEAGUE.to_string()),
    }
}

/// Summarize every game and sort by descending confidence.
pub fn rank_games(games: &[Game]) -> Vec<SummarizedGame> {
    let mut summaries: Vec<SummarizedGame> = games.iter().map(summarize_game).collect();
    sort_by_confidence(&mut summaries);
    summaries
}

/// Sort descending by confidence, absent confidence counting as 0.
///
/// Stable: games with equal confidence keep their relative order.
pub fn sort_by_confidence(games: &mut [SummarizedGame]) {
    games.sort_by(|a, b| b.rank_key().total_cmp(&a.rank_key()));
}

/// `{home}_vs_{away}_{commence_time}` for games without a provider id.
///
/// Uses the kickoff string the provider sent, unparsed. Games built
/// without one fall back to the parsed time rendered as RFC 3339 UTC.
fn synthesize_id(game: &Game) -> GameId {
    let part = |v: Option<&str>| v.unwrap_or("unknown").to_string();
    let kickoff = game.commence_raw.clone().or_else(|| {
        game.commence_time
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
    });
    format!(
        "{}_vs_{}_{}",
        part(game.home_team.as_deref()),
        part(game.away_team.as_deref()),
        part(kickoff.as_deref()),
    )
}

//! Leaderboard summary for the home page widgets.
//!
//! ```text
//! GET /api/leaderboard
//! ```

use actix_web::{get, web};
use tracing::warn;

use crate::domain::{LEADERBOARD_API_LIMIT, Leaderboard};
use crate::inbound::http::schemas::LeaderboardSchema;
use crate::inbound::http::state::HttpState;

/// Top builders plus headline totals; zeros when the catalog is unavailable.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses((status = 200, description = "Leaderboard", body = LeaderboardSchema)),
    tags = ["community"],
    operation_id = "getLeaderboard",
    security([])
)]
#[get("/api/leaderboard")]
pub async fn get_leaderboard(state: web::Data<HttpState>) -> web::Json<Leaderboard> {
    let leaderboard = state
        .community
        .leaderboard(LEADERBOARD_API_LIMIT)
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "leaderboard query failed; returning zeros");
            Leaderboard::default()
        });
    web::Json(leaderboard)
}

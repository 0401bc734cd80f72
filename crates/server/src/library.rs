//! Owned-games listing endpoint.

use api_types::library::{LibraryResponse, OwnedGameView};
use axum::{Extension, Json, extract::State};
use engine::users;

use crate::{ServerError, catalog::game_view, server::ServerState};

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<LibraryResponse>, ServerError> {
    let games = state
        .engine
        .library(&user.user_id)
        .await?
        .into_iter()
        .map(|(game, granted_at)| OwnedGameView {
            game: game_view(game),
            granted_at,
        })
        .collect();

    Ok(Json(LibraryResponse { games }))
}

//! Public catalog endpoints.

use api_types::game::{BestSellers, GameList, GameListResponse, GameView};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::Game;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn game_view(game: Game) -> GameView {
    GameView {
        id: game.id,
        name: game.name,
        detail: game.detail,
        price_minor: game.price.cents(),
        release_date: game.release_date,
        sales_count: game.sales_count,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(payload): Query<GameList>,
) -> Result<Json<GameListResponse>, ServerError> {
    let page = state
        .engine
        .games(
            payload.search.as_deref(),
            payload.page.unwrap_or(1),
            payload.per_page.unwrap_or(0),
        )
        .await?;

    Ok(Json(GameListResponse {
        games: page.games.into_iter().map(game_view).collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameView>, ServerError> {
    let game = state.engine.game(id).await?;
    Ok(Json(game_view(game)))
}

pub async fn best_sellers(
    State(state): State<ServerState>,
    Query(payload): Query<BestSellers>,
) -> Result<Json<Vec<GameView>>, ServerError> {
    let games = state
        .engine
        .best_sellers(payload.limit.unwrap_or(10))
        .await?;
    Ok(Json(games.into_iter().map(game_view).collect()))
}

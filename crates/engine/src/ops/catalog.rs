use std::collections::HashMap;

use uuid::Uuid;

use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*,
    sea_query::Expr,
};

use crate::{EngineError, Game, ResultEngine, games};

use super::Engine;

/// One page of catalog results.
#[derive(Clone, Debug)]
pub struct GamePage {
    pub games: Vec<Game>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl Engine {
    /// Return a single catalog item.
    pub async fn game(&self, game_id: Uuid) -> ResultEngine<Game> {
        let model = games::Entity::find_by_id(game_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("game not exists".to_string()))?;
        Game::try_from(model)
    }

    /// Paged catalog listing with optional name search, newest release first.
    ///
    /// `page` is 1-based; a zero `per_page` falls back to 12 like the
    /// storefront default, and is capped at 100. Both values come straight
    /// from the query string, so the offset math must not overflow.
    pub async fn games(
        &self,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> ResultEngine<GamePage> {
        let page = page.max(1);
        let per_page = if per_page == 0 { 12 } else { per_page.min(100) };
        // SQLite binds OFFSET as a signed integer.
        let offset = page
            .saturating_sub(1)
            .saturating_mul(per_page)
            .min(i64::MAX as u64);

        let mut query = games::Entity::find().order_by_desc(games::Column::ReleaseDate);
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(games::Column::Name.contains(search));
        }

        let total = query.clone().count(&self.database).await?;
        let models = query
            .limit(per_page)
            .offset(offset)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Game::try_from(model)?);
        }
        Ok(GamePage {
            games: out,
            total,
            page,
            per_page,
        })
    }

    /// Top sellers by `sales_count`.
    pub async fn best_sellers(&self, limit: u64) -> ResultEngine<Vec<Game>> {
        let models = games::Entity::find()
            .order_by_desc(games::Column::SalesCount)
            .limit(limit)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Game::try_from(model)?);
        }
        Ok(out)
    }

    /// Authoritative price fetch for checkout.
    ///
    /// Returns the games in the order of `game_ids`; any missing id is a
    /// `KeyNotFound` that aborts the whole operation. Prices are read without
    /// a lock: a concurrent catalog price change can still be charged at the
    /// price read here.
    pub(super) async fn require_games(
        &self,
        db_tx: &DatabaseTransaction,
        game_ids: &[Uuid],
    ) -> ResultEngine<Vec<Game>> {
        let ids: Vec<String> = game_ids.iter().map(Uuid::to_string).collect();
        let models = games::Entity::find()
            .filter(games::Column::Id.is_in(ids))
            .all(db_tx)
            .await?;

        let mut by_id: HashMap<Uuid, Game> = HashMap::with_capacity(models.len());
        for model in models {
            let game = Game::try_from(model)?;
            by_id.insert(game.id, game);
        }

        let mut out = Vec::with_capacity(game_ids.len());
        for id in game_ids {
            let game = by_id
                .remove(id)
                .ok_or_else(|| EngineError::KeyNotFound(format!("game {id} not exists")))?;
            out.push(game);
        }
        Ok(out)
    }

    /// Bump `sales_count` for a sold game within the purchase transaction.
    pub(super) async fn increment_sales_count(
        &self,
        db_tx: &DatabaseTransaction,
        game_id: Uuid,
    ) -> ResultEngine<()> {
        let result = games::Entity::update_many()
            .col_expr(
                games::Column::SalesCount,
                Expr::col(games::Column::SalesCount).add(1),
            )
            .filter(games::Column::Id.eq(game_id.to_string()))
            .exec(db_tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("game not exists".to_string()));
        }
        Ok(())
    }
}

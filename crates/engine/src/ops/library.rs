use chrono::{DateTime, Utc};
use uuid::Uuid;

use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{Game, ResultEngine, games, library};

use super::Engine;

impl Engine {
    /// Returns the subset of `game_ids` the user already owns.
    ///
    /// Checkout uses this as a precondition: any overlap aborts the purchase
    /// before the wallet is touched.
    pub(super) async fn owned_among(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        game_ids: &[Uuid],
    ) -> ResultEngine<Vec<Uuid>> {
        let ids: Vec<String> = game_ids.iter().map(Uuid::to_string).collect();
        let rows = library::Entity::find()
            .filter(library::Column::UserId.eq(user_id.to_string()))
            .filter(library::Column::GameId.is_in(ids))
            .all(db_tx)
            .await?;

        let mut owned = Vec::with_capacity(rows.len());
        for row in rows {
            if let Ok(id) = Uuid::parse_str(&row.game_id) {
                owned.push(id);
            }
        }
        Ok(owned)
    }

    /// Insert an ownership grant. The composite primary key rejects
    /// duplicates at the store level; the resulting database error rolls the
    /// checkout back.
    pub(super) async fn grant_ownership(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        game_id: Uuid,
        granted_at: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let entry = library::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            game_id: ActiveValue::Set(game_id.to_string()),
            granted_at: ActiveValue::Set(granted_at),
        };
        entry.insert(db_tx).await?;
        Ok(())
    }

    /// Lists the caller's owned games with their grant timestamps, newest
    /// grant first.
    pub async fn library(&self, user_id: &str) -> ResultEngine<Vec<(Game, DateTime<Utc>)>> {
        self.require_user(&self.database, user_id).await?;

        let rows: Vec<(library::Model, Option<games::Model>)> = library::Entity::find()
            .filter(library::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(library::Column::GrantedAt)
            .find_also_related(games::Entity)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (entry, game_model) in rows {
            let Some(game_model) = game_model else { continue };
            out.push((Game::try_from(game_model)?, entry.granted_at));
        }
        Ok(out)
    }
}

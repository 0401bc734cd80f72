use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{LedgerEntry, ResultEngine, ledger};

use super::Engine;

impl Engine {
    /// User-facing wallet history, newest first.
    pub async fn ledger_entries(
        &self,
        user_id: &str,
        limit: u64,
    ) -> ResultEngine<Vec<LedgerEntry>> {
        self.require_user(&self.database, user_id).await?;

        let models = ledger::Entity::find()
            .filter(ledger::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(ledger::Column::CreatedAt)
            .limit(limit)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(LedgerEntry::try_from(model)?);
        }
        Ok(out)
    }

    /// Append one immutable ledger entry within the enclosing transaction.
    pub(super) async fn append_ledger_entry(
        &self,
        db_tx: &DatabaseTransaction,
        entry: &LedgerEntry,
    ) -> ResultEngine<()> {
        ledger::ActiveModel::from(entry).insert(db_tx).await?;
        Ok(())
    }
}

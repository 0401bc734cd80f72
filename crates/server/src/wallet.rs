//! Wallet endpoints: balance, top-up and movement history.

use api_types::wallet::{
    BalanceView, EntryKind as ApiKind, EntryList, EntryListResponse, EntryView, TopUpNew,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use engine::{EntryKind, TopUpCmd, users};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: EntryKind) -> ApiKind {
    match kind {
        EntryKind::Credit => ApiKind::Credit,
        EntryKind::Debit => ApiKind::Debit,
    }
}

pub async fn balance(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BalanceView>, ServerError> {
    let balance_minor = state.engine.balance(&user.user_id).await?;
    Ok(Json(BalanceView { balance_minor }))
}

pub async fn top_up(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TopUpNew>,
) -> Result<Json<BalanceView>, ServerError> {
    let balance_minor = state
        .engine
        .top_up(TopUpCmd::new(user.user_id.as_str(), payload.amount_minor))
        .await?;
    Ok(Json(BalanceView { balance_minor }))
}

pub async fn transactions(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(payload): Query<EntryList>,
) -> Result<Json<EntryListResponse>, ServerError> {
    let limit = payload.limit.unwrap_or(50);
    let entries = state
        .engine
        .ledger_entries(&user.user_id, limit)
        .await?
        .into_iter()
        .map(|entry| EntryView {
            id: entry.id,
            kind: map_kind(entry.kind),
            amount_minor: entry.amount.cents(),
            detail: entry.detail,
            purchase_id: entry.purchase_id,
            created_at: entry.created_at,
        })
        .collect();

    Ok(Json(EntryListResponse { entries }))
}

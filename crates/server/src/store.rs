//! Checkout and buy endpoints.

use api_types::store::{BuyNew, CheckoutNew, ReceiptView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{BuyCmd, CheckoutCmd, CheckoutReceipt, users};

use crate::{ServerError, server::ServerState};

fn receipt_view(receipt: CheckoutReceipt) -> ReceiptView {
    ReceiptView {
        purchase_id: receipt.purchase_id,
        sub_total_minor: receipt.sub_total.cents(),
        discount_minor: receipt.discount.cents(),
        total_minor: receipt.total.cents(),
        balance_minor: receipt.new_balance.cents(),
    }
}

pub async fn checkout(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutNew>,
) -> Result<(StatusCode, Json<ReceiptView>), ServerError> {
    let mut cmd = CheckoutCmd::new(user.user_id.as_str(), payload.game_ids);
    if let Some(code) = payload.code {
        cmd = cmd.code_name(code);
    }

    let receipt = state.engine.checkout(cmd).await?;
    Ok((StatusCode::CREATED, Json(receipt_view(receipt))))
}

pub async fn buy(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BuyNew>,
) -> Result<(StatusCode, Json<ReceiptView>), ServerError> {
    let receipt = state
        .engine
        .buy(BuyCmd::new(user.user_id.as_str(), payload.game_id))
        .await?;
    Ok((StatusCode::CREATED, Json(receipt_view(receipt))))
}

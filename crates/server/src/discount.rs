//! Discount code preview endpoint.

use api_types::discount::{DiscountKind as ApiKind, DiscountValidate, DiscountView};
use axum::{Extension, Json, extract::State};
use engine::{DiscountKind, users};

use crate::{ServerError, server::ServerState};

pub async fn validate(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<DiscountValidate>,
) -> Result<Json<DiscountView>, ServerError> {
    let code = state
        .engine
        .validate_discount(&user.user_id, &payload.code)
        .await?;

    Ok(Json(DiscountView {
        name: code.name.clone(),
        kind: match code.kind {
            DiscountKind::Amount => ApiKind::Amount,
            DiscountKind::Percent => ApiKind::Percent,
        },
        value: code.value,
        remaining_uses: code.max_use - code.current_use,
        expire_date: code.expire_date,
    }))
}

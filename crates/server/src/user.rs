//! Caller profile endpoint.

use api_types::user::ProfileView;
use axum::{Extension, Json};
use engine::users;

use crate::ServerError;

/// Returns the authenticated user's profile. The password never leaves the
/// database layer.
pub async fn profile(
    Extension(user): Extension<users::Model>,
) -> Result<Json<ProfileView>, ServerError> {
    Ok(Json(ProfileView {
        user_id: user.user_id,
        username: user.username,
        email: user.email,
        role: user.role,
        profile_image: user.profile_image,
        balance_minor: user.wallet_balance,
    }))
}

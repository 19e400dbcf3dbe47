use axum::{routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::{dto::Profile, extractors::AuthUser},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<Profile> {
    Json(Profile::from(&user))
}

//! Entry-point link document

use axum::Json;
use axum::extract::State;

use crate::auth::CurrentUser;
use crate::core::ApiResult;
use crate::hateoas::{self, Link};
use crate::server::state::AppState;

/// Links a client needs to start navigating the API
///
/// GET /api
pub async fn get_root(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Link>>> {
    let links = hateoas::root_links(state.routes.as_ref())?;

    Ok(Json(links))
}

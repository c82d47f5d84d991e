//! Token issuance

use axum::Json;
use axum::extract::State;

use crate::core::{ApiError, ApiResult};
use crate::models::{CredentialsModel, TokenModel};
use crate::server::state::AppState;
use crate::validation::validate_credentials;

/// Exchange email and password for a bearer token
///
/// POST /api/authentication
///
/// The only route besides the health probes that works without a token.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<CredentialsModel>,
) -> ApiResult<Json<TokenModel>> {
    validate_credentials(&body, state.clock.now()).map_err(ApiError::Validation)?;

    let user = state
        .users
        .login(&body.email, &body.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let (token, expires_at) = state.tokens.issue(&user.id)?;

    Ok(Json(TokenModel { token, expires_at }))
}

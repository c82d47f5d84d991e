//! Author resource handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::{ApiError, ApiResult};
use crate::domain::Author;
use crate::hateoas::{self, ResourceWrapper, RouteName, RouteParams};
use crate::models::{AuthorForCreation, AuthorForUpdate, AuthorModel};
use crate::patch::{PatchDocument, patch_model};
use crate::server::state::AppState;
use crate::validation::{validate_author_for_creation, validate_author_for_update};

/// Get one author with its navigation links
///
/// GET /api/authors/{author_id}
pub async fn get_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(author_id): Path<Uuid>,
) -> ApiResult<Json<ResourceWrapper<AuthorModel>>> {
    let author = state
        .library
        .get_author(&author_id)
        .await?
        .ok_or_else(|| ApiError::not_found("author", author_id))?;

    let links = hateoas::author_links(state.routes.as_ref(), &author.id)?;
    let model = AuthorModel::project(&author, state.clock.as_ref());

    Ok(Json(ResourceWrapper::new(model, links)))
}

/// Create an author, along with any courses nested in the body
///
/// POST /api/authors
pub async fn add_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<AuthorForCreation>,
) -> ApiResult<impl IntoResponse> {
    validate_author_for_creation(&body, state.clock.now()).map_err(ApiError::Validation)?;

    let created = state.library.add_author(Author::from(body)).await?;

    let links = hateoas::author_links(state.routes.as_ref(), &created.id)?;
    let model = AuthorModel::project(&created, state.clock.as_ref());
    let location = state
        .routes
        .href(RouteName::GetAuthor, &RouteParams::author(created.id))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ResourceWrapper::new(model, links)),
    ))
}

/// Patch an author's own fields; courses are out of reach here
///
/// PATCH /api/authors/{author_id}
pub async fn update_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(author_id): Path<Uuid>,
    Json(document): Json<PatchDocument>,
) -> ApiResult<StatusCode> {
    let mut author = state
        .library
        .get_author(&author_id)
        .await?
        .ok_or_else(|| ApiError::not_found("author", author_id))?;

    let model = AuthorForUpdate::from(&author);
    let patched = patch_model(&model, &document)?;
    validate_author_for_update(&patched, state.clock.now()).map_err(ApiError::Validation)?;

    patched.apply_to(&mut author);
    state.library.update_author(author).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an author and every course it owns
///
/// DELETE /api/authors/{author_id}
pub async fn delete_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(author_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !state.library.author_exists(&author_id).await? {
        return Err(ApiError::not_found("author", author_id));
    }

    state.library.delete_author(&author_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

//! Author collection handlers
//!
//! A collection is addressed by an ordered, comma-joined id list. The
//! same encoding that appears in the collection's self link is the one
//! accepted in the path, so a creation Location can be followed as-is.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::{ApiError, ApiResult};
use crate::domain::Author;
use crate::hateoas::routes::collection_key;
use crate::hateoas::{self, CollectionWrapper, ResourceWrapper, RouteName, RouteParams};
use crate::models::{AuthorForCreation, AuthorModel};
use crate::server::state::AppState;
use crate::validation::validate_author_for_creation;

/// Parse a comma-joined id segment, keeping the order of appearance
fn parse_ids(segment: &str) -> ApiResult<Vec<Uuid>> {
    if segment.trim().is_empty() {
        return Err(ApiError::invalid_argument(
            "author_ids",
            "At least one author id is required",
        ));
    }

    segment
        .split(',')
        .map(|part| {
            Uuid::parse_str(part.trim()).map_err(|_| {
                ApiError::invalid_argument(
                    "author_ids",
                    format!("'{}' is not a valid author id", part),
                )
            })
        })
        .collect()
}

/// Wrap a batch of authors, one link set per element plus the
/// collection-level set for `requested` in its original order.
fn wrap_authors(
    state: &AppState,
    authors: &[Author],
    requested: &[Uuid],
) -> ApiResult<CollectionWrapper<AuthorModel>> {
    let mut wrapped = Vec::with_capacity(authors.len());
    for author in authors {
        let links = hateoas::author_links(state.routes.as_ref(), &author.id)?;
        let model = AuthorModel::project(author, state.clock.as_ref());
        wrapped.push(ResourceWrapper::new(model, links));
    }

    let links = hateoas::author_collection_links(state.routes.as_ref(), requested)?;

    Ok(CollectionWrapper::new(wrapped, links))
}

/// Fetch an exact set of authors; missing any of them is a miss for all
///
/// GET /api/authorcollections/{ids}
pub async fn get_author_collection(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(ids): Path<String>,
) -> ApiResult<Json<CollectionWrapper<AuthorModel>>> {
    let requested = parse_ids(&ids)?;

    let authors = state.library.get_authors(&requested).await?;
    if authors.len() != requested.len() {
        return Err(ApiError::not_found("authors", collection_key(&requested)));
    }

    Ok(Json(wrap_authors(&state, &authors, &requested)?))
}

/// Create a batch of authors in one unit of work
///
/// POST /api/authorcollections
pub async fn add_author_collection(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<Vec<AuthorForCreation>>,
) -> ApiResult<impl IntoResponse> {
    if body.is_empty() {
        return Err(ApiError::invalid_argument(
            "authors",
            "At least one author is required",
        ));
    }

    let now = state.clock.now();
    for author in &body {
        validate_author_for_creation(author, now).map_err(ApiError::Validation)?;
    }

    let entities = body.into_iter().map(Author::from).collect();
    let created = state.library.add_authors(entities).await?;
    let created_ids: Vec<Uuid> = created.iter().map(|author| author.id).collect();

    let location = state.routes.href(
        RouteName::GetAuthorCollection,
        &RouteParams::author_ids(&created_ids),
    )?;
    let wrapper = wrap_authors(&state, &created, &created_ids)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(wrapper),
    ))
}

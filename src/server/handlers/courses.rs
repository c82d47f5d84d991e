//! Handlers for courses addressed by their own id

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::{ApiError, ApiResult};
use crate::hateoas::{self, ResourceWrapper};
use crate::models::{CourseForUpdate, CourseModel};
use crate::patch::{PatchDocument, patch_model};
use crate::server::state::AppState;
use crate::validation::validate_course_for_update;

/// Get one course with its links
///
/// GET /api/courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<ResourceWrapper<CourseModel>>> {
    let course = state
        .library
        .get_course(&course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("course", course_id))?;

    let links = hateoas::course_links(state.routes.as_ref(), &course.id)?;

    Ok(Json(ResourceWrapper::new(
        CourseModel::project(&course),
        links,
    )))
}

/// Patch a course's title or description
///
/// PATCH /api/courses/{course_id}
pub async fn update_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<Uuid>,
    Json(document): Json<PatchDocument>,
) -> ApiResult<StatusCode> {
    let mut course = state
        .library
        .get_course(&course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("course", course_id))?;

    let model = CourseForUpdate::from(&course);
    let patched = patch_model(&model, &document)?;
    validate_course_for_update(&patched, state.clock.now()).map_err(ApiError::Validation)?;

    patched.apply_to(&mut course);
    state.library.update_course(course).await?;

    Ok(StatusCode::NO_CONTENT)
}

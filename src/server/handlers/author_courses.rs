//! Handlers for courses scoped to their owning author

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::{ApiError, ApiResult};
use crate::domain::Course;
use crate::hateoas::{self, CollectionWrapper, ResourceWrapper, RouteName, RouteParams};
use crate::models::{CourseForCreation, CourseForUpdate, CourseModel};
use crate::patch::{PatchDocument, patch_model};
use crate::server::state::AppState;
use crate::validation::{validate_course_for_creation, validate_course_for_update};

async fn require_author(state: &AppState, author_id: &Uuid) -> ApiResult<()> {
    if !state.library.author_exists(author_id).await? {
        return Err(ApiError::not_found("author", author_id));
    }
    Ok(())
}

fn wrap_course(state: &AppState, course: &Course) -> ApiResult<ResourceWrapper<CourseModel>> {
    let links = hateoas::course_links(state.routes.as_ref(), &course.id)?;
    Ok(ResourceWrapper::new(CourseModel::project(course), links))
}

/// List an author's courses, title-ordered, each with its own links
///
/// GET /api/authors/{author_id}/courses
pub async fn get_courses_for_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(author_id): Path<Uuid>,
) -> ApiResult<Json<CollectionWrapper<CourseModel>>> {
    require_author(&state, &author_id).await?;

    let courses = state.library.get_courses_for_author(&author_id).await?;

    let mut wrapped = Vec::with_capacity(courses.len());
    for course in &courses {
        wrapped.push(wrap_course(&state, course)?);
    }
    let links = hateoas::author_course_collection_links(state.routes.as_ref(), &author_id)?;

    Ok(Json(CollectionWrapper::new(wrapped, links)))
}

/// Add a course under an author
///
/// POST /api/authors/{author_id}/courses
pub async fn create_course_for_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(author_id): Path<Uuid>,
    Json(body): Json<CourseForCreation>,
) -> ApiResult<impl IntoResponse> {
    validate_course_for_creation(&body, state.clock.now()).map_err(ApiError::Validation)?;
    require_author(&state, &author_id).await?;

    let created = state
        .library
        .add_course(&author_id, Course::from(body))
        .await?;

    let location = state.routes.href(
        RouteName::GetCourseForAuthor,
        &RouteParams::author_course(author_id, created.id),
    )?;
    let wrapper = wrap_course(&state, &created)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(wrapper),
    ))
}

/// Get one course scoped to its author
///
/// GET /api/authors/{author_id}/courses/{course_id}
pub async fn get_course_for_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ResourceWrapper<CourseModel>>> {
    require_author(&state, &author_id).await?;

    let course = state
        .library
        .get_course_for_author(&author_id, &course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("course", course_id))?;

    Ok(Json(wrap_course(&state, &course)?))
}

/// Replace a course, or create it at the addressed id when absent.
///
/// PUT /api/authors/{author_id}/courses/{course_id}
///
/// The creation branch is the one place a client-chosen id enters the
/// system: the course takes the id from the path so the response
/// Location and the request URI agree.
pub async fn upsert_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<CourseForUpdate>,
) -> ApiResult<Response> {
    validate_course_for_update(&body, state.clock.now()).map_err(ApiError::Validation)?;
    require_author(&state, &author_id).await?;

    let existing = state
        .library
        .get_course_for_author(&author_id, &course_id)
        .await?;

    if let Some(mut course) = existing {
        body.apply_to(&mut course);
        state.library.update_course(course).await?;
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    // The id may be absent under this author yet taken by another one;
    // creating here would silently reassign that course.
    if state.library.get_course(&course_id).await?.is_some() {
        return Err(ApiError::invalid_argument(
            "course_id",
            format!("'{}' already identifies another author's course", course_id),
        ));
    }

    let course = Course {
        id: course_id,
        title: body.title,
        description: body.description,
        author_id,
    };
    let created = state.library.add_course(&author_id, course).await?;

    let location = state.routes.href(
        RouteName::GetCourseForAuthor,
        &RouteParams::author_course(author_id, created.id),
    )?;
    let wrapper = wrap_course(&state, &created)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(wrapper),
    )
        .into_response())
}

/// Patch a course scoped to its author
///
/// PATCH /api/authors/{author_id}/courses/{course_id}
pub async fn update_course_for_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
    Json(document): Json<PatchDocument>,
) -> ApiResult<StatusCode> {
    require_author(&state, &author_id).await?;

    let mut course = state
        .library
        .get_course_for_author(&author_id, &course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("course", course_id))?;

    let model = CourseForUpdate::from(&course);
    let patched = patch_model(&model, &document)?;
    validate_course_for_update(&patched, state.clock.now()).map_err(ApiError::Validation)?;

    patched.apply_to(&mut course);
    state.library.update_course(course).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a course scoped to its author
///
/// DELETE /api/authors/{author_id}/courses/{course_id}
pub async fn delete_course_for_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    require_author(&state, &author_id).await?;

    let course = state
        .library
        .get_course_for_author(&author_id, &course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("course", course_id))?;

    state.library.delete_course(&course.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

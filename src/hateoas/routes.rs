//! Route table for link construction
//!
//! Maps route names to the URIs clients call. Projector functions and
//! handlers both go through `LinkBuilder`, so the path layout is written
//! down in exactly one place.

use anyhow::{Result, anyhow};
use uuid::Uuid;

/// Named routes of the HTTP surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// Entry-point link document
    GetRoot,
    /// Fetch one author
    GetAuthor,
    /// Create one author
    AddAuthor,
    /// Patch an author
    UpdateAuthor,
    /// Delete an author with its courses
    DeleteAuthor,
    /// Fetch an ordered set of authors by id list
    GetAuthorCollection,
    /// Create a batch of authors
    AddAuthorCollection,
    /// List an author's courses
    GetCoursesForAuthor,
    /// Add a course under an author
    CreateCourseForAuthor,
    /// Fetch a course scoped to its author
    GetCourseForAuthor,
    /// Replace or patch a course scoped to its author
    UpdateAuthorCourse,
    /// Delete a course scoped to its author
    DeleteAuthorCourse,
    /// Fetch a course by its own id
    GetCourse,
    /// Patch a course by its own id
    UpdateCourse,
}

impl RouteName {
    /// Stable route name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::GetRoot => "GetRoot",
            RouteName::GetAuthor => "GetAuthor",
            RouteName::AddAuthor => "AddAuthor",
            RouteName::UpdateAuthor => "UpdateAuthor",
            RouteName::DeleteAuthor => "DeleteAuthor",
            RouteName::GetAuthorCollection => "GetAuthorCollection",
            RouteName::AddAuthorCollection => "AddAuthorCollection",
            RouteName::GetCoursesForAuthor => "GetCoursesForAuthor",
            RouteName::CreateCourseForAuthor => "CreateCourseForAuthor",
            RouteName::GetCourseForAuthor => "GetCourseForAuthor",
            RouteName::UpdateAuthorCourse => "UpdateAuthorCourse",
            RouteName::DeleteAuthorCourse => "DeleteAuthorCourse",
            RouteName::GetCourse => "GetCourse",
            RouteName::UpdateCourse => "UpdateCourse",
        }
    }
}

/// Parameters substituted into a route
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    /// Author id for author-scoped routes
    pub author_id: Option<Uuid>,

    /// Course id for course-scoped routes
    pub course_id: Option<Uuid>,

    /// Ordered id list for the author collection route
    pub author_ids: Vec<Uuid>,
}

impl RouteParams {
    /// Parameters for routes that take none
    pub fn none() -> Self {
        Self::default()
    }

    /// Parameters for an author-scoped route
    pub fn author(author_id: Uuid) -> Self {
        Self {
            author_id: Some(author_id),
            ..Self::default()
        }
    }

    /// Parameters for a course addressed by its own id
    pub fn course(course_id: Uuid) -> Self {
        Self {
            course_id: Some(course_id),
            ..Self::default()
        }
    }

    /// Parameters for a course scoped to its author
    pub fn author_course(author_id: Uuid, course_id: Uuid) -> Self {
        Self {
            author_id: Some(author_id),
            course_id: Some(course_id),
            ..Self::default()
        }
    }

    /// Parameters for the author collection route, preserving id order
    pub fn author_ids(ids: &[Uuid]) -> Self {
        Self {
            author_ids: ids.to_vec(),
            ..Self::default()
        }
    }

    fn require_author(&self, route: RouteName) -> Result<Uuid> {
        self.author_id
            .ok_or_else(|| anyhow!("route {} requires an author id", route.as_str()))
    }

    fn require_course(&self, route: RouteName) -> Result<Uuid> {
        self.course_id
            .ok_or_else(|| anyhow!("route {} requires a course id", route.as_str()))
    }
}

/// Deterministic path segment for an ordered id list.
///
/// Ids are joined with commas in the order given; each renders in the
/// lowercase hyphenated form. The same list always yields the same text,
/// so the resulting href doubles as a creation Location.
pub fn collection_key(ids: &[Uuid]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolves route names to hrefs
pub trait LinkBuilder: Send + Sync {
    /// Resolve `route` with `params` to the URI a client can call
    fn href(&self, route: RouteName, params: &RouteParams) -> Result<String>;
}

/// The crate's route table, rooted at `/api`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiRoutes;

impl ApiRoutes {
    /// Create the route table
    pub fn new() -> Self {
        Self
    }
}

impl LinkBuilder for ApiRoutes {
    fn href(&self, route: RouteName, params: &RouteParams) -> Result<String> {
        let href = match route {
            RouteName::GetRoot => "/api".to_string(),
            RouteName::AddAuthor => "/api/authors".to_string(),
            RouteName::GetAuthor | RouteName::UpdateAuthor | RouteName::DeleteAuthor => {
                format!("/api/authors/{}", params.require_author(route)?)
            }
            RouteName::AddAuthorCollection => "/api/authorcollections".to_string(),
            RouteName::GetAuthorCollection => {
                format!("/api/authorcollections/{}", collection_key(&params.author_ids))
            }
            RouteName::GetCoursesForAuthor | RouteName::CreateCourseForAuthor => {
                format!("/api/authors/{}/courses", params.require_author(route)?)
            }
            RouteName::GetCourseForAuthor
            | RouteName::UpdateAuthorCourse
            | RouteName::DeleteAuthorCourse => {
                format!(
                    "/api/authors/{}/courses/{}",
                    params.require_author(route)?,
                    params.require_course(route)?
                )
            }
            RouteName::GetCourse | RouteName::UpdateCourse => {
                format!("/api/courses/{}", params.require_course(route)?)
            }
        };

        Ok(href)
    }
}

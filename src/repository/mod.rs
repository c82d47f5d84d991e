//! Storage ports for the author/course aggregate
//!
//! Mutating methods stage work; nothing is durable until `save` commits it.
//! The service layer owns the mutation-then-save sequence, so a caller never
//! sees a mutation reported successful whose save step failed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::ApiResult;
use crate::domain::{Author, Course, User};

/// Port over author storage
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Stage an insert: assigns the author a fresh id, then gives every
    /// nested course a fresh id and rewires its owning-author reference.
    /// Returns the fully wired entity.
    async fn add(&self, author: Author) -> ApiResult<Author>;

    /// Nil ids fail fast with an invalid-argument error before storage is
    /// touched
    async fn exists(&self, author_id: &Uuid) -> ApiResult<bool>;

    /// Absence is `None`, never an error at this layer
    async fn get(&self, author_id: &Uuid) -> ApiResult<Option<Author>>;

    /// Matching authors ordered by last name, first name as tie-break; ids
    /// with no match are silently omitted
    async fn get_many(&self, author_ids: &[Uuid]) -> ApiResult<Vec<Author>>;

    /// Attach the entity and mark it dirty
    async fn update(&self, author: Author) -> ApiResult<()>;

    /// Stage removal; owned courses go with it through the referential
    /// cascade at save time
    async fn delete(&self, author_id: &Uuid) -> ApiResult<()>;

    /// Commit staged mutations; returns how many were applied
    async fn save(&self) -> ApiResult<usize>;
}

/// Port over course storage
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Stage an insert: gives the course a fresh id when it carries none,
    /// and always overwrites the course's owning-author reference with
    /// `author_id`, whatever the incoming value was. Unknown authors are
    /// rejected.
    async fn add(&self, author_id: &Uuid, course: Course) -> ApiResult<Course>;

    async fn get(&self, course_id: &Uuid) -> ApiResult<Option<Course>>;

    /// Fetch scoped to an author, for flows that must not see another
    /// author's course
    async fn get_for_author(&self, author_id: &Uuid, course_id: &Uuid)
    -> ApiResult<Option<Course>>;

    /// The author's courses ordered by title
    async fn list_for_author(&self, author_id: &Uuid) -> ApiResult<Vec<Course>>;

    /// Attach the entity and mark it dirty
    async fn update(&self, course: Course) -> ApiResult<()>;

    async fn delete(&self, course_id: &Uuid) -> ApiResult<()>;

    /// Commit staged mutations; returns how many were applied
    async fn save(&self) -> ApiResult<usize>;
}

/// Port over user lookup for token issuance
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact email and password match; empty credentials fail fast with an
    /// invalid-argument error
    async fn get_by_credentials(&self, email: &str, password: &str) -> ApiResult<Option<User>>;
}

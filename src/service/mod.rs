//! Aggregate service
//!
//! Thin orchestration over the repository ports. Every write runs as
//! mutation-then-save, so a caller never hears "created" or "updated" from
//! an operation whose save step failed. Batch author creation stages all
//! inserts first and saves exactly once; the batch is one unit of work.
//!
//! No validation and no link projection happen here. Those belong to the
//! rule tables and the hypermedia projector.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::ApiResult;
use crate::domain::{Author, Course, User};
use crate::repository::{AuthorRepository, CourseRepository, UserRepository};

/// Orchestrates author and course writes against their repositories
#[derive(Clone)]
pub struct CourseLibraryService {
    authors: Arc<dyn AuthorRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl CourseLibraryService {
    pub fn new(authors: Arc<dyn AuthorRepository>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { authors, courses }
    }

    pub async fn add_author(&self, author: Author) -> ApiResult<Author> {
        let added = self.authors.add(author).await?;
        self.authors.save().await?;
        Ok(added)
    }

    /// N staged adds, one save
    pub async fn add_authors(&self, authors: Vec<Author>) -> ApiResult<Vec<Author>> {
        let mut added = Vec::with_capacity(authors.len());
        for author in authors {
            added.push(self.authors.add(author).await?);
        }
        self.authors.save().await?;
        Ok(added)
    }

    pub async fn author_exists(&self, author_id: &Uuid) -> ApiResult<bool> {
        self.authors.exists(author_id).await
    }

    pub async fn get_author(&self, author_id: &Uuid) -> ApiResult<Option<Author>> {
        self.authors.get(author_id).await
    }

    pub async fn get_authors(&self, author_ids: &[Uuid]) -> ApiResult<Vec<Author>> {
        self.authors.get_many(author_ids).await
    }

    pub async fn update_author(&self, author: Author) -> ApiResult<()> {
        self.authors.update(author).await?;
        self.authors.save().await?;
        Ok(())
    }

    pub async fn delete_author(&self, author_id: &Uuid) -> ApiResult<()> {
        self.authors.delete(author_id).await?;
        self.authors.save().await?;
        Ok(())
    }

    pub async fn add_course(&self, author_id: &Uuid, course: Course) -> ApiResult<Course> {
        let added = self.courses.add(author_id, course).await?;
        self.courses.save().await?;
        Ok(added)
    }

    pub async fn get_course(&self, course_id: &Uuid) -> ApiResult<Option<Course>> {
        self.courses.get(course_id).await
    }

    pub async fn get_course_for_author(
        &self,
        author_id: &Uuid,
        course_id: &Uuid,
    ) -> ApiResult<Option<Course>> {
        self.courses.get_for_author(author_id, course_id).await
    }

    pub async fn get_courses_for_author(&self, author_id: &Uuid) -> ApiResult<Vec<Course>> {
        self.courses.list_for_author(author_id).await
    }

    pub async fn update_course(&self, course: Course) -> ApiResult<()> {
        self.courses.update(course).await?;
        self.courses.save().await?;
        Ok(())
    }

    pub async fn delete_course(&self, course_id: &Uuid) -> ApiResult<()> {
        self.courses.delete(course_id).await?;
        self.courses.save().await?;
        Ok(())
    }
}

/// Looks accounts up for token issuance
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Option<User>> {
        self.users.get_by_credentials(email, password).await
    }
}

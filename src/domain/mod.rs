//! Domain entities for the author/course aggregate
//!
//! An [`Author`] is the aggregate root and owns its [`Course`]s; a course
//! never exists without an owning author. Identifiers are assigned by the
//! repository's identity port, so freshly built entities carry a nil id
//! until they pass through `add`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An author and the courses they own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier, assigned on add
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    pub date_of_birth: DateTime<Utc>,

    /// Present only for deceased authors
    pub date_of_death: Option<DateTime<Utc>>,

    pub main_category: String,

    /// Owned aggregate children
    pub courses: Vec<Course>,
}

/// A course belonging to exactly one author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier, assigned on add
    pub id: Uuid,

    pub title: String,

    /// May be empty on creation; updates require a non-empty value
    pub description: String,

    /// The owning author; always overwritten by the repository on add
    pub author_id: Uuid,
}

/// An account that can be exchanged for a bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub email: String,

    pub password: String,
}

impl User {
    pub fn new(id: Uuid, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
        }
    }
}

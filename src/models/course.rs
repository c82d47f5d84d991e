//! Wire models for courses

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Course;

/// Payload for creating a course under an author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseForCreation {
    #[serde(default)]
    pub title: String,

    /// Empty descriptions are accepted here; updates reject them
    #[serde(default)]
    pub description: String,
}

/// Payload for replacing or patching a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseForUpdate {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

/// Response projection of a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author_id: Uuid,
}

impl CourseModel {
    pub fn project(course: &Course) -> Self {
        CourseModel {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

impl From<CourseForCreation> for Course {
    fn from(model: CourseForCreation) -> Self {
        Course {
            id: Uuid::nil(),
            title: model.title,
            description: model.description,
            author_id: Uuid::nil(),
        }
    }
}

impl From<&Course> for CourseForUpdate {
    fn from(course: &Course) -> Self {
        CourseForUpdate {
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}

impl CourseForUpdate {
    /// Overwrite the course's own fields, leaving id and owner untouched
    pub fn apply_to(self, course: &mut Course) {
        course.title = self.title;
        course.description = self.description;
    }
}

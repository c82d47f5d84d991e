//! Wire models for authors
//!
//! Creation and update models deserialize leniently: every field carries a
//! serde default so a key removed by a patch document re-materializes as its
//! empty value and gets judged by the validation tables instead of blowing
//! up deserialization. The response model is produced by pure projection
//! functions, never by behavior hanging off the entity itself.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Clock;
use crate::domain::{Author, Course};
use crate::models::course::CourseForCreation;

/// Payload for creating an author, optionally with nested courses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorForCreation {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default = "far_past")]
    pub date_of_birth: DateTime<Utc>,

    #[serde(default)]
    pub date_of_death: Option<DateTime<Utc>>,

    #[serde(default)]
    pub main_category: String,

    #[serde(default)]
    pub courses: Vec<CourseForCreation>,
}

/// Payload for replacing an author's own fields; nested courses are managed
/// through their own routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorForUpdate {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default = "far_past")]
    pub date_of_birth: DateTime<Utc>,

    #[serde(default)]
    pub date_of_death: Option<DateTime<Utc>>,

    #[serde(default)]
    pub main_category: String,
}

/// Response projection of an author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorModel {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

/// A date every age rule rejects, standing in for absent dates of birth
fn far_past() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

impl AuthorModel {
    /// Project an author into its response shape
    pub fn project(author: &Author, clock: &dyn Clock) -> Self {
        let until = author.date_of_death.unwrap_or_else(|| clock.now());
        AuthorModel {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: completed_years(author.date_of_birth, until),
            main_category: author.main_category.clone(),
        }
    }
}

/// Whole years elapsed between two instants
///
/// The year difference, minus one when the anniversary has not yet occurred
/// in the final year.
pub fn completed_years(from: DateTime<Utc>, until: DateTime<Utc>) -> i32 {
    let mut years = until.year() - from.year();
    if (until.month(), until.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

impl From<AuthorForCreation> for Author {
    fn from(model: AuthorForCreation) -> Self {
        Author {
            id: Uuid::nil(),
            first_name: model.first_name,
            last_name: model.last_name,
            date_of_birth: model.date_of_birth,
            date_of_death: model.date_of_death,
            main_category: model.main_category,
            courses: model.courses.into_iter().map(Course::from).collect(),
        }
    }
}

impl From<&Author> for AuthorForUpdate {
    fn from(author: &Author) -> Self {
        AuthorForUpdate {
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
            main_category: author.main_category.clone(),
        }
    }
}

impl AuthorForUpdate {
    /// Overwrite the author's own fields, leaving id and courses untouched
    pub fn apply_to(self, author: &mut Author) {
        author.first_name = self.first_name;
        author.last_name = self.last_name;
        author.date_of_birth = self.date_of_birth;
        author.date_of_death = self.date_of_death;
        author.main_category = self.main_category;
    }
}

//! Rule tables per entity and operation
//!
//! Tables are built once behind a `OnceLock` and shared across requests.
//! Row order is the contract: failure lists come back in exactly this order.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;

use crate::models::{
    AuthorForCreation, AuthorForUpdate, CourseForCreation, CourseForUpdate, CredentialsModel,
};
use crate::validation::{RuleSet, ValidationFailure};

// =============================================================================
// Field checks
// =============================================================================

fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Blank values are skipped; the required rule already covers them
fn length(value: &str, label: &str, min: usize, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let count = value.chars().count();
    if count < min || count > max {
        Err(format!(
            "{} must be between {} and {} characters",
            label, min, max
        ))
    } else {
        Ok(())
    }
}

fn max_length(value: &str, label: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{} must not exceed {} characters", label, max))
    } else {
        Ok(())
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_format(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let pattern = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("valid email pattern")
    });
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err("Email must be a valid email address".to_string())
    }
}

/// The same instant N years earlier, in date space
///
/// Feb 29 collapses onto Feb 28 when the target year is not a leap year.
fn years_before(instant: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    instant
        .with_year(instant.year() - years)
        .or_else(|| {
            instant
                .with_day(28)
                .and_then(|d| d.with_year(instant.year() - years))
        })
        .unwrap_or(instant)
}

/// Age window, open at both ends: an author exactly 18 or exactly 80 today
/// is rejected
fn valid_age(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), String> {
    let youngest_allowed = years_before(now, 18);
    let oldest_allowed = years_before(now, 80);
    if date_of_birth > oldest_allowed && date_of_birth < youngest_allowed {
        Ok(())
    } else {
        Err("Invalid date of birth".to_string())
    }
}

/// Fires only when both sides are filled out
fn differs_from_title(title: &str, description: &str) -> Result<(), String> {
    if !title.trim().is_empty() && !description.trim().is_empty() && title == description {
        Err("The description should be different from the title".to_string())
    } else {
        Ok(())
    }
}

// =============================================================================
// Tables
// =============================================================================

fn author_creation_rules() -> &'static RuleSet<AuthorForCreation> {
    static RULES: OnceLock<RuleSet<AuthorForCreation>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule("first_name", "required", |m: &AuthorForCreation, _| {
                required(&m.first_name, "First name")
            })
            .rule("first_name", "length", |m: &AuthorForCreation, _| {
                length(&m.first_name, "First name", 3, 50)
            })
            .rule("last_name", "required", |m: &AuthorForCreation, _| {
                required(&m.last_name, "Last name")
            })
            .rule("last_name", "length", |m: &AuthorForCreation, _| {
                length(&m.last_name, "Last name", 3, 50)
            })
            .rule("date_of_birth", "valid_age", |m: &AuthorForCreation, now| {
                valid_age(m.date_of_birth, now)
            })
            .rule("main_category", "required", |m: &AuthorForCreation, _| {
                required(&m.main_category, "Main category")
            })
    })
}

fn author_update_rules() -> &'static RuleSet<AuthorForUpdate> {
    static RULES: OnceLock<RuleSet<AuthorForUpdate>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule("first_name", "required", |m: &AuthorForUpdate, _| {
                required(&m.first_name, "First name")
            })
            .rule("first_name", "length", |m: &AuthorForUpdate, _| {
                length(&m.first_name, "First name", 3, 50)
            })
            .rule("last_name", "required", |m: &AuthorForUpdate, _| {
                required(&m.last_name, "Last name")
            })
            .rule("last_name", "length", |m: &AuthorForUpdate, _| {
                length(&m.last_name, "Last name", 3, 50)
            })
            .rule("date_of_birth", "valid_age", |m: &AuthorForUpdate, now| {
                valid_age(m.date_of_birth, now)
            })
            .rule("main_category", "required", |m: &AuthorForUpdate, _| {
                required(&m.main_category, "Main category")
            })
    })
}

fn course_creation_rules() -> &'static RuleSet<CourseForCreation> {
    static RULES: OnceLock<RuleSet<CourseForCreation>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule("title", "required", |m: &CourseForCreation, _| {
                required(&m.title, "Title")
            })
            .rule("title", "length", |m: &CourseForCreation, _| {
                length(&m.title, "Title", 3, 100)
            })
            .rule("description", "max_length", |m: &CourseForCreation, _| {
                max_length(&m.description, "Description", 300)
            })
    })
}

fn course_update_rules() -> &'static RuleSet<CourseForUpdate> {
    static RULES: OnceLock<RuleSet<CourseForUpdate>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule("title", "required", |m: &CourseForUpdate, _| {
                required(&m.title, "Title")
            })
            .rule("title", "length", |m: &CourseForUpdate, _| {
                length(&m.title, "Title", 3, 100)
            })
            .rule("description", "max_length", |m: &CourseForUpdate, _| {
                max_length(&m.description, "Description", 300)
            })
            .rule("description", "required", |m: &CourseForUpdate, _| {
                required(&m.description, "Description")
            })
            .rule(
                "description",
                "differs_from_title",
                |m: &CourseForUpdate, _| differs_from_title(&m.title, &m.description),
            )
    })
}

fn credentials_rules() -> &'static RuleSet<CredentialsModel> {
    static RULES: OnceLock<RuleSet<CredentialsModel>> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .rule("email", "required", |m: &CredentialsModel, _| {
                required(&m.email, "Email")
            })
            .rule("email", "length", |m: &CredentialsModel, _| {
                length(&m.email, "Email", 8, 50)
            })
            .rule("email", "email", |m: &CredentialsModel, _| {
                email_format(&m.email)
            })
            .rule("password", "required", |m: &CredentialsModel, _| {
                required(&m.password, "Password")
            })
            .rule("password", "length", |m: &CredentialsModel, _| {
                length(&m.password, "Password", 8, 50)
            })
    })
}

// =============================================================================
// Entry points
// =============================================================================

/// Author creation: the author table, then each nested course against the
/// course creation table with an indexed field path
pub fn validate_author_for_creation(
    model: &AuthorForCreation,
    now: DateTime<Utc>,
) -> Result<(), Vec<ValidationFailure>> {
    let mut failures = author_creation_rules().collect_failures(model, now);
    for (index, course) in model.courses.iter().enumerate() {
        for failure in course_creation_rules().collect_failures(course, now) {
            failures.push(ValidationFailure::new(
                format!("courses[{}].{}", index, failure.field),
                failure.rule,
                failure.message,
            ));
        }
    }
    if failures.is_empty() { Ok(()) } else { Err(failures) }
}

pub fn validate_author_for_update(
    model: &AuthorForUpdate,
    now: DateTime<Utc>,
) -> Result<(), Vec<ValidationFailure>> {
    author_update_rules().validate(model, now)
}

pub fn validate_course_for_creation(
    model: &CourseForCreation,
    now: DateTime<Utc>,
) -> Result<(), Vec<ValidationFailure>> {
    course_creation_rules().validate(model, now)
}

pub fn validate_course_for_update(
    model: &CourseForUpdate,
    now: DateTime<Utc>,
) -> Result<(), Vec<ValidationFailure>> {
    course_update_rules().validate(model, now)
}

pub fn validate_credentials(
    model: &CredentialsModel,
    now: DateTime<Utc>,
) -> Result<(), Vec<ValidationFailure>> {
    credentials_rules().validate(model, now)
}

// =============================================================================
// Tests
// =============================================================================

//! Rule-table validation
//!
//! Every entity/operation pair owns a fixed, ordered table of rules. A table
//! run evaluates each rule against the model and collects every failure in
//! table order, never stopping at the first one, so identical inputs always
//! produce identical failure lists. Rules that need "now" (the age window)
//! receive it as an argument instead of reading the wall clock.
//!
//! The tables themselves live in [`rules`]; this module is the engine.

pub mod rules;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use rules::{
    validate_author_for_creation, validate_author_for_update, validate_course_for_creation,
    validate_course_for_update, validate_credentials,
};

/// A single failed rule, in the shape clients receive in error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Field path, possibly indexed for nested courses (`courses[0].title`)
    pub field: String,
    /// Stable rule identifier (`required`, `length`, `valid_age`, ...)
    pub rule: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationFailure {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

type RuleCheck<T> = Box<dyn Fn(&T, DateTime<Utc>) -> Result<(), String> + Send + Sync>;

/// One row of a rule table
struct Rule<T> {
    field: &'static str,
    name: &'static str,
    check: RuleCheck<T>,
}

/// An ordered table of rules for one entity/operation pair
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; evaluation order is append order
    pub fn rule(
        mut self,
        field: &'static str,
        name: &'static str,
        check: impl Fn(&T, DateTime<Utc>) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule {
            field,
            name,
            check: Box::new(check),
        });
        self
    }

    /// Run every rule and return the failures in table order
    pub fn collect_failures(&self, model: &T, now: DateTime<Utc>) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            if let Err(message) = (rule.check)(model, now) {
                failures.push(ValidationFailure::new(rule.field, rule.name, message));
            }
        }
        failures
    }

    /// Run every rule; `Err` carries the complete ordered failure list
    pub fn validate(&self, model: &T, now: DateTime<Utc>) -> Result<(), Vec<ValidationFailure>> {
        let failures = self.collect_failures(model, now);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

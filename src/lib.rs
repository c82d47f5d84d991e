//! # Course Library
//!
//! A hypermedia-driven HTTP API for managing authors and the courses they own.
//!
//! ## Features
//!
//! - **Author/Course Aggregate**: authors exclusively own their courses; deleting
//!   an author cascades, and a course can never point at a missing author
//! - **Staged Unit of Work**: repository mutations queue up and commit together
//!   on an explicit save, so batch creation is all-or-nothing
//! - **Rule-Table Validation**: every rule runs, failures come back as one
//!   ordered list instead of stopping at the first hit
//! - **Partial Updates**: JSON-patch documents applied to a projection of the
//!   stored entity, then re-validated before anything is written
//! - **Hypermedia Responses**: each resource and collection carries a fixed,
//!   ordered link set resolved through a single route table
//! - **Bearer Authentication**: opaque server-side tokens with a configured
//!   time-to-live, issued against seeded accounts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use course_library::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let store = Arc::new(InMemoryStore::default());
//!     store.seed_user("admin@example.com", "admin-secret")?;
//!
//!     let clock = Arc::new(SystemClock);
//!     let state = AppState {
//!         library: CourseLibraryService::new(store.clone(), store.clone()),
//!         users: UserService::new(store),
//!         tokens: TokenStore::new(clock.clone(), 18_000),
//!         routes: Arc::new(ApiRoutes::new()),
//!         clock,
//!     };
//!
//!     course_library::server::serve("127.0.0.1:3000", state).await
//! }
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod domain;
pub mod hateoas;
pub mod models;
pub mod patch;
pub mod repository;
pub mod server;
pub mod service;
pub mod storage;
pub mod validation;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, Clock, ErrorResponse, FixedClock, IdProvider, SequentialIdProvider,
        SystemClock, UuidProvider,
    };

    // === Domain & Wire Models ===
    pub use crate::domain::{Author, Course, User};
    pub use crate::models::{
        AuthorForCreation, AuthorForUpdate, AuthorModel, CourseForCreation, CourseForUpdate,
        CourseModel, CredentialsModel, TokenModel,
    };

    // === Validation ===
    pub use crate::validation::{
        RuleSet, ValidationFailure, validate_author_for_creation, validate_author_for_update,
        validate_course_for_creation, validate_course_for_update, validate_credentials,
    };

    // === Patch ===
    pub use crate::patch::{PatchDocument, PatchError, PatchOperation, patch_model};

    // === Repositories & Services ===
    pub use crate::repository::{AuthorRepository, CourseRepository, UserRepository};
    pub use crate::service::{CourseLibraryService, UserService};

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Hypermedia ===
    pub use crate::hateoas::{
        ApiRoutes, CollectionWrapper, Link, LinkBuilder, Relation, ResourceWrapper, RouteName,
        RouteParams, Verb,
    };

    // === Auth ===
    pub use crate::auth::{CurrentUser, TokenStore};

    // === Config ===
    pub use crate::config::{AppConfig, SeedUser};

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}

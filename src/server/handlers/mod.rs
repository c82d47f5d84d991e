//! Request handlers for the HTTP surface
//!
//! Handlers stay thin: they parse and validate input, call into the
//! service layer, and project the result through the hypermedia module.
//! Every error path flows through [`crate::core::ApiError`].

pub mod authentication;
pub mod author_collections;
pub mod author_courses;
pub mod authors;
pub mod courses;
pub mod root;

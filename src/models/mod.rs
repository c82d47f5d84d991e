//! Wire models separating the HTTP surface from the domain entities

pub mod auth;
pub mod author;
pub mod course;

pub use auth::{CredentialsModel, TokenModel};
pub use author::{AuthorForCreation, AuthorForUpdate, AuthorModel, completed_years};
pub use course::{CourseForCreation, CourseForUpdate, CourseModel};

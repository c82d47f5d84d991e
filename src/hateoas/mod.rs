//! Hypermedia projection: links, relations, and response envelopes
//!
//! Responses carry navigation links so a client can walk the API without
//! hard-coding URIs. Link construction is split in two: a route table
//! (`LinkBuilder`) that turns a route name plus parameters into an href,
//! and pure projector functions that assemble the fixed link set for each
//! resource kind. Nothing in here touches storage or application state.

pub mod projector;
pub mod routes;

use serde::{Deserialize, Serialize};

pub use projector::{
    author_collection_links, author_course_collection_links, author_links, course_links,
    root_links,
};
pub use routes::{ApiRoutes, LinkBuilder, RouteName, RouteParams};

/// The relationship a link expresses, as it appears on the wire.
///
/// This is a closed set: every link the API emits uses one of these
/// relations, and clients key off the strings below.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// The resource the response describes
    #[serde(rename = "self")]
    SelfRef,

    /// Create a single author
    CreateAuthor,

    /// Patch an existing author
    UpdateAuthor,

    /// Delete an author and the courses it owns
    DeleteAuthor,

    /// Create a batch of authors in one request
    CreateAuthors,

    /// Add a course under an author
    CreateAuthorCourse,

    /// Patch a course scoped to its author
    UpdateAuthorCourse,

    /// Delete a course scoped to its author
    DeleteAuthorCourse,

    /// Patch a course addressed by its own id
    UpdateCourse,
}

/// HTTP method the client should use when following a link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A single navigation link: where to go, what it means, how to call it.
///
/// Links are constructed fresh for every response and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Target URI
    pub href: String,

    /// Relation of the target to the current resource
    pub rel: Relation,

    /// HTTP method for the target
    pub method: Verb,
}

impl Link {
    /// Create a new link
    pub fn new(href: impl Into<String>, rel: Relation, method: Verb) -> Self {
        Self {
            href: href.into(),
            rel,
            method,
        }
    }
}

/// Envelope for a single resource: the payload plus its link set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceWrapper<T> {
    /// The projected resource
    pub value: T,

    /// Links applicable to this resource
    pub links: Vec<Link>,
}

impl<T> ResourceWrapper<T> {
    /// Wrap a resource with its links
    pub fn new(value: T, links: Vec<Link>) -> Self {
        Self { value, links }
    }
}

/// Envelope for a homogeneous collection: each element individually
/// wrapped, plus one collection-level link set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionWrapper<T> {
    /// The wrapped elements
    pub value: Vec<ResourceWrapper<T>>,

    /// Links applicable to the collection as a whole
    pub links: Vec<Link>,
}

impl<T> CollectionWrapper<T> {
    /// Wrap a collection with its links
    pub fn new(value: Vec<ResourceWrapper<T>>, links: Vec<Link>) -> Self {
        Self { value, links }
    }
}

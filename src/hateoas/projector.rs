//! Fixed link sets per resource kind
//!
//! Each function projects the ordered link set for one kind of response.
//! Order is part of the contract: clients may key off position as well as
//! relation. Hrefs always come from the route table, never from string
//! concatenation here.

use anyhow::Result;
use uuid::Uuid;

use super::routes::{LinkBuilder, RouteName, RouteParams};
use super::{Link, Relation, Verb};

/// Link set for a single author
pub fn author_links(routes: &dyn LinkBuilder, author_id: &Uuid) -> Result<Vec<Link>> {
    let params = RouteParams::author(*author_id);

    Ok(vec![
        Link::new(
            routes.href(RouteName::GetAuthor, &params)?,
            Relation::SelfRef,
            Verb::Get,
        ),
        Link::new(
            routes.href(RouteName::AddAuthor, &RouteParams::none())?,
            Relation::CreateAuthor,
            Verb::Post,
        ),
        Link::new(
            routes.href(RouteName::UpdateAuthor, &params)?,
            Relation::UpdateAuthor,
            Verb::Patch,
        ),
        Link::new(
            routes.href(RouteName::DeleteAuthor, &params)?,
            Relation::DeleteAuthor,
            Verb::Delete,
        ),
    ])
}

/// Link set for a single course
pub fn course_links(routes: &dyn LinkBuilder, course_id: &Uuid) -> Result<Vec<Link>> {
    let params = RouteParams::course(*course_id);

    Ok(vec![
        Link::new(
            routes.href(RouteName::GetCourse, &params)?,
            Relation::SelfRef,
            Verb::Get,
        ),
        Link::new(
            routes.href(RouteName::UpdateCourse, &params)?,
            Relation::UpdateCourse,
            Verb::Patch,
        ),
    ])
}

/// Collection-level link set for an author's courses.
///
/// Every link targets the collection URI; the update and delete
/// relations advertise course operations whose final segment the client
/// supplies when it picks a course.
pub fn author_course_collection_links(
    routes: &dyn LinkBuilder,
    author_id: &Uuid,
) -> Result<Vec<Link>> {
    let params = RouteParams::author(*author_id);
    let collection = routes.href(RouteName::GetCoursesForAuthor, &params)?;

    Ok(vec![
        Link::new(collection.clone(), Relation::SelfRef, Verb::Get),
        Link::new(
            routes.href(RouteName::CreateCourseForAuthor, &params)?,
            Relation::CreateAuthorCourse,
            Verb::Post,
        ),
        Link::new(collection.clone(), Relation::UpdateAuthorCourse, Verb::Patch),
        Link::new(collection, Relation::DeleteAuthorCourse, Verb::Delete),
    ])
}

/// Collection-level link set for an ordered author id list.
///
/// The self href embeds the ids exactly as requested, so identical input
/// lists always produce byte-identical link text.
pub fn author_collection_links(
    routes: &dyn LinkBuilder,
    author_ids: &[Uuid],
) -> Result<Vec<Link>> {
    Ok(vec![
        Link::new(
            routes.href(
                RouteName::GetAuthorCollection,
                &RouteParams::author_ids(author_ids),
            )?,
            Relation::SelfRef,
            Verb::Get,
        ),
        Link::new(
            routes.href(RouteName::AddAuthorCollection, &RouteParams::none())?,
            Relation::CreateAuthors,
            Verb::Post,
        ),
    ])
}

/// Entry-point link set for the API root
pub fn root_links(routes: &dyn LinkBuilder) -> Result<Vec<Link>> {
    Ok(vec![
        Link::new(
            routes.href(RouteName::GetRoot, &RouteParams::none())?,
            Relation::SelfRef,
            Verb::Get,
        ),
        Link::new(
            routes.href(RouteName::AddAuthor, &RouteParams::none())?,
            Relation::CreateAuthor,
            Verb::Post,
        ),
        Link::new(
            routes.href(RouteName::AddAuthorCollection, &RouteParams::none())?,
            Relation::CreateAuthors,
            Verb::Post,
        ),
    ])
}

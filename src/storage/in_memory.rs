//! In-memory storage for the author/course aggregate
//!
//! Backs all three repository ports with `RwLock`ed maps. Mutations are
//! staged into a queue and only applied to the maps when `save` runs, so
//! reads always see the last committed state. The referential pieces live
//! here and not in application code: course inserts are rejected for
//! unknown authors, and deleting an author sweeps its courses.

use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::{ApiError, ApiResult, IdProvider, UuidProvider};
use crate::domain::{Author, Course, User};
use crate::repository::{AuthorRepository, CourseRepository, UserRepository};

/// A staged mutation, applied in order at save time
enum Staged {
    InsertAuthor(Author),
    UpdateAuthor(Author),
    DeleteAuthor(Uuid),
    InsertCourse(Course),
    UpdateCourse(Course),
    DeleteCourse(Uuid),
}

/// In-memory aggregate store
///
/// Clones share the same underlying maps, so one store can serve as all
/// repository ports at once.
#[derive(Clone)]
pub struct InMemoryStore {
    authors: Arc<RwLock<HashMap<Uuid, Author>>>,
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    staged: Arc<RwLock<Vec<Staged>>>,
    ids: Arc<dyn IdProvider>,
}

impl InMemoryStore {
    /// Create a store drawing identifiers from the given port
    pub fn new(ids: Arc<dyn IdProvider>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(HashMap::new())),
            courses: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            staged: Arc::new(RwLock::new(Vec::new())),
            ids,
        }
    }

    /// Provision an account directly, bypassing the staging queue
    pub fn seed_user(&self, email: &str, password: &str) -> ApiResult<User> {
        let user = User::new(self.ids.new_id(), email, password);
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        users.insert(user.id, user.clone());

        Ok(user)
    }

    fn require_id(id: &Uuid, argument: &str) -> ApiResult<()> {
        if id.is_nil() {
            return Err(ApiError::invalid_argument(argument, "must not be empty"));
        }
        Ok(())
    }

    /// True when the author is committed or sits in the staging queue
    fn author_known(&self, author_id: &Uuid) -> ApiResult<bool> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        if authors.contains_key(author_id) {
            return Ok(true);
        }
        let staged = self
            .staged
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(staged.iter().any(
            |op| matches!(op, Staged::InsertAuthor(author) if author.id == *author_id),
        ))
    }

    fn stage(&self, op: Staged) -> ApiResult<()> {
        let mut staged = self
            .staged
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        staged.push(op);

        Ok(())
    }

    fn commit(&self) -> ApiResult<usize> {
        let mut staged = self
            .staged
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut authors = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut courses = self
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let applied = staged.len();
        for op in staged.drain(..) {
            match op {
                Staged::InsertAuthor(author) | Staged::UpdateAuthor(author) => {
                    authors.insert(author.id, author);
                }
                Staged::DeleteAuthor(id) => {
                    authors.remove(&id);
                    courses.retain(|_, course| course.author_id != id);
                }
                Staged::InsertCourse(course) | Staged::UpdateCourse(course) => {
                    courses.insert(course.id, course);
                }
                Staged::DeleteCourse(id) => {
                    courses.remove(&id);
                }
            }
        }

        Ok(applied)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(UuidProvider))
    }
}

#[async_trait]
impl AuthorRepository for InMemoryStore {
    async fn add(&self, mut author: Author) -> ApiResult<Author> {
        author.id = self.ids.new_id();
        for course in &mut author.courses {
            course.id = self.ids.new_id();
            course.author_id = author.id;
        }

        // the author row and its course rows are staged separately; the
        // caller gets back the wired aggregate
        let mut stored = author.clone();
        let courses = std::mem::take(&mut stored.courses);
        self.stage(Staged::InsertAuthor(stored))?;
        for course in courses {
            self.stage(Staged::InsertCourse(course))?;
        }

        Ok(author)
    }

    async fn exists(&self, author_id: &Uuid) -> ApiResult<bool> {
        Self::require_id(author_id, "author_id")?;
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.contains_key(author_id))
    }

    async fn get(&self, author_id: &Uuid) -> ApiResult<Option<Author>> {
        Self::require_id(author_id, "author_id")?;
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.get(author_id).cloned())
    }

    async fn get_many(&self, author_ids: &[Uuid]) -> ApiResult<Vec<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let wanted: HashSet<&Uuid> = author_ids.iter().collect();
        let mut matched: Vec<Author> = authors
            .values()
            .filter(|author| wanted.contains(&author.id))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });

        Ok(matched)
    }

    async fn update(&self, mut author: Author) -> ApiResult<()> {
        // author updates never touch the course rows
        author.courses.clear();
        self.stage(Staged::UpdateAuthor(author))
    }

    async fn delete(&self, author_id: &Uuid) -> ApiResult<()> {
        self.stage(Staged::DeleteAuthor(*author_id))
    }

    async fn save(&self) -> ApiResult<usize> {
        self.commit()
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn add(&self, author_id: &Uuid, mut course: Course) -> ApiResult<Course> {
        Self::require_id(author_id, "author_id")?;
        if !self.author_known(author_id)? {
            return Err(ApiError::not_found("author", author_id));
        }

        // a caller-supplied id survives so upserts can place a course at
        // a known address; fresh courses get one from the identity port
        if course.id.is_nil() {
            course.id = self.ids.new_id();
        }
        // always set the owning author to the passed-in id
        course.author_id = *author_id;
        self.stage(Staged::InsertCourse(course.clone()))?;

        Ok(course)
    }

    async fn get(&self, course_id: &Uuid) -> ApiResult<Option<Course>> {
        Self::require_id(course_id, "course_id")?;
        let courses = self
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(courses.get(course_id).cloned())
    }

    async fn get_for_author(
        &self,
        author_id: &Uuid,
        course_id: &Uuid,
    ) -> ApiResult<Option<Course>> {
        Self::require_id(author_id, "author_id")?;
        Self::require_id(course_id, "course_id")?;
        let courses = self
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(courses
            .get(course_id)
            .filter(|course| course.author_id == *author_id)
            .cloned())
    }

    async fn list_for_author(&self, author_id: &Uuid) -> ApiResult<Vec<Course>> {
        Self::require_id(author_id, "author_id")?;
        let courses = self
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matched: Vec<Course> = courses
            .values()
            .filter(|course| course.author_id == *author_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(matched)
    }

    async fn update(&self, course: Course) -> ApiResult<()> {
        self.stage(Staged::UpdateCourse(course))
    }

    async fn delete(&self, course_id: &Uuid) -> ApiResult<()> {
        self.stage(Staged::DeleteCourse(*course_id))
    }

    async fn save(&self) -> ApiResult<usize> {
        self.commit()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_by_credentials(&self, email: &str, password: &str) -> ApiResult<Option<User>> {
        if email.is_empty() {
            return Err(ApiError::invalid_argument("email", "must not be empty"));
        }
        if password.is_empty() {
            return Err(ApiError::invalid_argument("password", "must not be empty"));
        }
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users
            .values()
            .find(|user| user.email == email && user.password == password)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequentialIdProvider;
    use chrono::{TimeZone, Utc};

    fn store() -> (InMemoryStore, Arc<SequentialIdProvider>) {
        let ids = Arc::new(SequentialIdProvider::new());
        (InMemoryStore::new(ids.clone()), ids)
    }

    fn author(first: &str, last: &str) -> Author {
        Author {
            id: Uuid::nil(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap(),
            date_of_death: None,
            main_category: "Literature".to_string(),
            courses: vec![],
        }
    }

    fn course(title: &str) -> Course {
        Course {
            id: Uuid::nil(),
            title: title.to_string(),
            description: String::new(),
            author_id: Uuid::nil(),
        }
    }

    #[tokio::test]
    async fn test_add_assigns_ids_and_wires_courses() {
        let (store, ids) = store();
        let mut subject = author("Jane", "Austen");
        subject.courses = vec![course("Irony"), course("Letters")];

        let added = AuthorRepository::add(&store, subject).await.unwrap();

        assert_eq!(added.id, Uuid::from_u128(1));
        assert_eq!(added.courses[0].id, Uuid::from_u128(2));
        assert_eq!(added.courses[1].id, Uuid::from_u128(3));
        assert!(added.courses.iter().all(|c| c.author_id == added.id));
        // one generator call per created entity
        assert_eq!(ids.issued(), 3);
    }

    #[tokio::test]
    async fn test_mutations_are_invisible_until_save() {
        let (store, _) = store();
        let added = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();

        assert!(
            AuthorRepository::get(&store, &added.id)
                .await
                .unwrap()
                .is_none()
        );

        let applied = AuthorRepository::save(&store).await.unwrap();
        assert_eq!(applied, 1);

        assert!(
            AuthorRepository::get(&store, &added.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_save_drains_the_staging_queue() {
        let (store, _) = store();
        AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();
        assert_eq!(AuthorRepository::save(&store).await.unwrap(), 1);
        assert_eq!(AuthorRepository::save(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_course_add_overwrites_incoming_owner() {
        let (store, _) = store();
        let owner = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();
        AuthorRepository::save(&store).await.unwrap();

        let mut stray = course("Irony");
        stray.author_id = Uuid::new_v4();

        let added = CourseRepository::add(&store, &owner.id, stray).await.unwrap();
        assert_eq!(added.author_id, owner.id);
    }

    #[tokio::test]
    async fn test_course_add_rejects_unknown_author() {
        let (store, _) = store();
        let result = CourseRepository::add(&store, &Uuid::new_v4(), course("Irony")).await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_course_add_keeps_a_caller_supplied_id() {
        let (store, _) = store();
        let owner = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();
        AuthorRepository::save(&store).await.unwrap();

        let mut placed = course("Irony");
        placed.id = Uuid::from_u128(42);

        let added = CourseRepository::add(&store, &owner.id, placed).await.unwrap();
        assert_eq!(added.id, Uuid::from_u128(42));
    }

    #[tokio::test]
    async fn test_course_add_sees_staged_author() {
        let (store, _) = store();
        let staged = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();

        // author not yet committed, but already staged
        let added = CourseRepository::add(&store, &staged.id, course("Irony")).await;
        assert!(added.is_ok());
    }

    #[tokio::test]
    async fn test_get_many_orders_by_last_then_first_name() {
        let (store, _) = store();
        let zweig = AuthorRepository::add(&store, author("Stefan", "Zweig"))
            .await
            .unwrap();
        let jane = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();
        let ada = AuthorRepository::add(&store, author("Ada", "Austen"))
            .await
            .unwrap();
        AuthorRepository::save(&store).await.unwrap();

        let fetched = store
            .get_many(&[zweig.id, jane.id, ada.id, Uuid::new_v4()])
            .await
            .unwrap();

        let names: Vec<(String, String)> = fetched
            .into_iter()
            .map(|a| (a.first_name, a.last_name))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Ada".to_string(), "Austen".to_string()),
                ("Jane".to_string(), "Austen".to_string()),
                ("Stefan".to_string(), "Zweig".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_nil_ids_fail_fast_without_staging() {
        let (store, _) = store();

        assert!(matches!(
            AuthorRepository::get(&store, &Uuid::nil()).await,
            Err(ApiError::InvalidArgument { .. })
        ));
        assert!(matches!(
            store.exists(&Uuid::nil()).await,
            Err(ApiError::InvalidArgument { .. })
        ));
        assert!(matches!(
            CourseRepository::add(&store, &Uuid::nil(), course("Irony")).await,
            Err(ApiError::InvalidArgument { .. })
        ));

        // nothing reached the staging queue
        assert_eq!(AuthorRepository::save(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_author_cascades_to_courses() {
        let (store, _) = store();
        let mut doomed = author("Jane", "Austen");
        doomed.courses = vec![course("Irony"), course("Letters")];
        let doomed = AuthorRepository::add(&store, doomed).await.unwrap();
        let keeper = AuthorRepository::add(&store, author("Stefan", "Zweig"))
            .await
            .unwrap();
        AuthorRepository::save(&store).await.unwrap();
        let kept_course = CourseRepository::add(&store, &keeper.id, course("Chess"))
            .await
            .unwrap();
        CourseRepository::save(&store).await.unwrap();

        AuthorRepository::delete(&store, &doomed.id).await.unwrap();
        AuthorRepository::save(&store).await.unwrap();

        assert!(
            AuthorRepository::get(&store, &doomed.id)
                .await
                .unwrap()
                .is_none()
        );
        for orphan in &doomed.courses {
            assert!(
                CourseRepository::get(&store, &orphan.id)
                    .await
                    .unwrap()
                    .is_none()
            );
        }
        assert!(
            CourseRepository::get(&store, &kept_course.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_update_attaches_and_commits_on_save() {
        let (store, _) = store();
        let owner = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();
        AuthorRepository::save(&store).await.unwrap();
        let mut existing = CourseRepository::add(&store, &owner.id, course("Irony"))
            .await
            .unwrap();
        CourseRepository::save(&store).await.unwrap();

        existing.title = "Free Indirect Speech".to_string();
        CourseRepository::update(&store, existing.clone())
            .await
            .unwrap();

        // still the old committed row
        let committed = CourseRepository::get(&store, &existing.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(committed.title, "Irony");

        assert_eq!(CourseRepository::save(&store).await.unwrap(), 1);
        let committed = CourseRepository::get(&store, &existing.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(committed.title, "Free Indirect Speech");
    }

    #[tokio::test]
    async fn test_list_for_author_orders_by_title() {
        let (store, _) = store();
        let owner = AuthorRepository::add(&store, author("Jane", "Austen"))
            .await
            .unwrap();
        AuthorRepository::save(&store).await.unwrap();
        for title in ["Zeugma", "Anaphora", "Metonymy"] {
            CourseRepository::add(&store, &owner.id, course(title))
                .await
                .unwrap();
        }
        CourseRepository::save(&store).await.unwrap();

        let titles: Vec<String> = store
            .list_for_author(&owner.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Anaphora", "Metonymy", "Zeugma"]);
    }

    #[tokio::test]
    async fn test_user_lookup_requires_exact_credentials() {
        let (store, _) = store();
        store.seed_user("reader@example.com", "correct horse").unwrap();

        let found = store
            .get_by_credentials("reader@example.com", "correct horse")
            .await
            .unwrap();
        assert!(found.is_some());

        let wrong = store
            .get_by_credentials("reader@example.com", "wrong")
            .await
            .unwrap();
        assert!(wrong.is_none());

        assert!(matches!(
            store.get_by_credentials("", "pw").await,
            Err(ApiError::InvalidArgument { .. })
        ));
    }
}

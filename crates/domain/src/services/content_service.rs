use crate::authorization::{authorize, Requirement};
use crate::entities::{merge, Content, ContentPatch, NewContent, User};
use crate::errors::DomainError;
use crate::repositories::{ContentRepository, RatingRepository, UnitOfWork, UnitOfWorkFactory};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Content Service - CRUD over content items.
///
/// Mutating operations require an admin caller. Each operation runs in its
/// own unit of work, which is committed on success and rolled back on every
/// other exit path.
pub struct ContentService {
    units: Arc<dyn UnitOfWorkFactory>,
}

impl ContentService {
    pub fn new(units: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { units }
    }

    /// Create a content item with a server-generated id
    #[instrument(skip_all)]
    pub async fn create(
        &self,
        caller: Option<&User>,
        new_content: NewContent,
    ) -> Result<Content, DomainError> {
        let admin = authorize(Requirement::Admin, caller)?;
        new_content.validate()?;

        let content = Content::create(new_content);
        let stored = content.clone();
        self.in_unit_of_work(move |unit| unit.create(&stored)).await?;

        info!(content_id = %content.id, admin = %admin.username, "Created content");
        Ok(content)
    }

    /// Merge the fields present in `patch` onto the stored item
    #[instrument(skip(self, caller, patch))]
    pub async fn update(
        &self,
        caller: Option<&User>,
        id: &str,
        patch: ContentPatch,
    ) -> Result<Content, DomainError> {
        let admin = authorize(Requirement::Admin, caller)?;
        if patch.is_empty() {
            debug!("Empty patch, record will be rewritten unchanged");
        }

        let id = id.to_string();
        let updated = self
            .in_unit_of_work(move |unit| {
                let existing = require_existing(unit, &id)?;
                let merged = merge(existing, patch);
                unit.update(&merged)?;
                Ok(merged)
            })
            .await?;

        info!(content_id = %updated.id, admin = %admin.username, "Updated content");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Content, DomainError> {
        let id = id.to_string();
        self.in_unit_of_work(move |unit| require_existing(unit, &id)).await
    }

    /// Delete a content item together with every rating that references it
    #[instrument(skip(self, caller))]
    pub async fn delete(&self, caller: Option<&User>, id: &str) -> Result<(), DomainError> {
        let admin = authorize(Requirement::Admin, caller)?;

        let target = id.to_string();
        let removed_ratings = self
            .in_unit_of_work(move |unit| {
                let existing = require_existing(unit, &target)?;
                let removed = unit.delete_all_by_content(&existing.id)?;
                unit.delete(&existing)?;
                Ok(removed)
            })
            .await?;

        info!(
            content_id = %id,
            removed_ratings,
            admin = %admin.username,
            "Deleted content"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<HashSet<Content>, DomainError> {
        let contents = self.in_unit_of_work(|unit| unit.retrieve_all()).await?;

        debug!(count = contents.len(), "Loaded all content");
        Ok(contents)
    }

    async fn in_unit_of_work<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T, DomainError> + Send + 'static,
    {
        let units = Arc::clone(&self.units);

        tokio::task::spawn_blocking(move || -> Result<T, DomainError> {
            let mut unit = units.begin()?;
            let value = work(&mut *unit)?;
            unit.commit()?;
            Ok(value)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
    }
}

fn require_existing(unit: &mut dyn UnitOfWork, id: &str) -> Result<Content, DomainError> {
    unit.retrieve(id)?
        .ok_or_else(|| DomainError::ContentNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Rating;
    use crate::repositories::MockUnitOfWorkFactory;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Tables {
        contents: HashMap<String, Content>,
        ratings: Vec<Rating>,
    }

    /// Units of work edit a private copy of the tables and publish it on commit.
    #[derive(Clone, Default)]
    struct MemoryStore {
        tables: Arc<Mutex<Tables>>,
        fail_content_delete: bool,
    }

    impl MemoryStore {
        fn snapshot(&self) -> Tables {
            self.tables.lock().unwrap().clone()
        }

        fn add_rating(&self, content_id: &str, score: i32) {
            self.tables.lock().unwrap().ratings.push(Rating::new(
                content_id.to_string(),
                "rater".to_string(),
                score,
            ));
        }
    }

    impl UnitOfWorkFactory for MemoryStore {
        fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
            Ok(Box::new(MemoryUnitOfWork {
                published: Arc::clone(&self.tables),
                staged: self.snapshot(),
                fail_content_delete: self.fail_content_delete,
            }))
        }
    }

    struct MemoryUnitOfWork {
        published: Arc<Mutex<Tables>>,
        staged: Tables,
        fail_content_delete: bool,
    }

    impl ContentRepository for MemoryUnitOfWork {
        fn create(&mut self, content: &Content) -> Result<(), DomainError> {
            self.staged.contents.insert(content.id.clone(), content.clone());
            Ok(())
        }

        fn retrieve(&mut self, id: &str) -> Result<Option<Content>, DomainError> {
            Ok(self.staged.contents.get(id).cloned())
        }

        fn update(&mut self, content: &Content) -> Result<(), DomainError> {
            self.staged.contents.insert(content.id.clone(), content.clone());
            Ok(())
        }

        fn delete(&mut self, content: &Content) -> Result<(), DomainError> {
            if self.fail_content_delete {
                return Err(DomainError::RepositoryError("disk full".to_string()));
            }
            self.staged.contents.remove(&content.id);
            Ok(())
        }

        fn retrieve_all(&mut self) -> Result<HashSet<Content>, DomainError> {
            Ok(self.staged.contents.values().cloned().collect())
        }
    }

    impl RatingRepository for MemoryUnitOfWork {
        fn save(&mut self, rating: &Rating) -> Result<(), DomainError> {
            self.staged.ratings.push(rating.clone());
            Ok(())
        }

        fn find_by_content(&mut self, content_id: &str) -> Result<Vec<Rating>, DomainError> {
            Ok(self
                .staged
                .ratings
                .iter()
                .filter(|r| r.content_id == content_id)
                .cloned()
                .collect())
        }

        fn delete_all_by_content(&mut self, content_id: &str) -> Result<usize, DomainError> {
            let before = self.staged.ratings.len();
            self.staged.ratings.retain(|r| r.content_id != content_id);
            Ok(before - self.staged.ratings.len())
        }
    }

    impl UnitOfWork for MemoryUnitOfWork {
        fn commit(self: Box<Self>) -> Result<(), DomainError> {
            let this = *self;
            *this.published.lock().unwrap() = this.staged;
            Ok(())
        }
    }

    fn admin() -> User {
        User::new("root".to_string(), "root@example.com".to_string(), true)
    }

    fn member() -> User {
        User::new("sam".to_string(), "sam@example.com".to_string(), false)
    }

    fn intro() -> NewContent {
        NewContent::new("Intro", "Basics", "v1")
    }

    fn service(store: &MemoryStore) -> ContentService {
        ContentService::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn create_assigns_id_and_persists_record() {
        let store = MemoryStore::default();
        let service = service(&store);

        let created = service.create(Some(&admin()), intro()).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.title, "Intro");
        assert_eq!(created.description, "Basics");
        assert_eq!(created.video, "v1");

        let stored = store.snapshot().contents[&created.id].clone();
        assert_eq!(stored.title, "Intro");
    }

    #[tokio::test]
    async fn create_never_reuses_an_id() {
        let store = MemoryStore::default();
        let service = service(&store);
        let admin = admin();

        let mut ids = HashSet::new();
        for _ in 0..20 {
            let created = service.create(Some(&admin), intro()).await.unwrap();
            assert!(ids.insert(created.id));
        }
        assert_eq!(store.snapshot().contents.len(), 20);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let store = MemoryStore::default();
        let service = service(&store);

        let result = service
            .create(Some(&admin()), NewContent::new("", "Basics", "v1"))
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
        assert!(store.snapshot().contents.is_empty());
    }

    #[tokio::test]
    async fn gated_operations_fail_before_touching_the_store() {
        let mut units = MockUnitOfWorkFactory::new();
        units.expect_begin().never();
        let service = ContentService::new(Arc::new(units));
        let member = member();

        assert!(matches!(
            service.create(Some(&member), intro()).await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            service.create(None, intro()).await,
            Err(DomainError::Unauthenticated)
        ));
        assert!(matches!(
            service.update(Some(&member), "c-1", ContentPatch::default()).await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            service.delete(None, "c-1").await,
            Err(DomainError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn get_returns_created_record() {
        let store = MemoryStore::default();
        let service = service(&store);

        let created = service.create(Some(&admin()), intro()).await.unwrap();
        let fetched = service.get(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, created.title);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.video, created.video);
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let store = MemoryStore::default();
        let service = service(&store);
        let admin = admin();
        let created = service.create(Some(&admin), intro()).await.unwrap();

        let patch = ContentPatch {
            title: Some("T".to_string()),
            ..Default::default()
        };
        let updated = service
            .update(Some(&admin), &created.id, patch)
            .await
            .unwrap();

        assert_eq!(updated.title, "T");
        assert_eq!(updated.description, "Basics");
        assert_eq!(updated.video, "v1");

        let stored = service.get(&created.id).await.unwrap();
        assert_eq!(stored.title, "T");
        assert_eq!(stored.description, "Basics");
    }

    #[tokio::test]
    async fn missing_id_is_always_not_found() {
        let store = MemoryStore::default();
        let service = service(&store);
        let admin = admin();

        match service.get("missing").await {
            Err(DomainError::ContentNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            service
                .update(Some(&admin), "missing", ContentPatch::default())
                .await,
            Err(DomainError::ContentNotFound(_))
        ));
        assert!(matches!(
            service.delete(Some(&admin), "missing").await,
            Err(DomainError::ContentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_cascades_to_ratings_of_that_content_only() {
        let store = MemoryStore::default();
        let service = service(&store);
        let admin = admin();
        let doomed = service.create(Some(&admin), intro()).await.unwrap();
        let kept = service.create(Some(&admin), intro()).await.unwrap();
        store.add_rating(&doomed.id, 4);
        store.add_rating(&doomed.id, 2);
        store.add_rating(&kept.id, 5);

        service.delete(Some(&admin), &doomed.id).await.unwrap();

        let tables = store.snapshot();
        assert!(!tables.contents.contains_key(&doomed.id));
        assert!(tables.contents.contains_key(&kept.id));
        assert!(tables.ratings.iter().all(|r| r.content_id != doomed.id));
        assert_eq!(tables.ratings.len(), 1);
        assert!(matches!(
            service.get(&doomed.id).await,
            Err(DomainError::ContentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn failed_delete_rolls_back_rating_cleanup() {
        let mut store = MemoryStore::default();
        let created = service(&store).create(Some(&admin()), intro()).await.unwrap();
        store.add_rating(&created.id, 3);

        store.fail_content_delete = true;
        let result = service(&store).delete(Some(&admin()), &created.id).await;

        assert!(matches!(result, Err(DomainError::RepositoryError(_))));
        let tables = store.snapshot();
        assert!(tables.contents.contains_key(&created.id));
        assert_eq!(tables.ratings.len(), 1);
    }

    #[tokio::test]
    async fn get_all_returns_exactly_the_stored_set() {
        let store = MemoryStore::default();
        let service = service(&store);
        let admin = admin();
        assert!(service.get_all().await.unwrap().is_empty());

        let mut expected = HashSet::new();
        for title in ["C", "A", "B"] {
            let created = service
                .create(Some(&admin), NewContent::new(title, "", "v"))
                .await
                .unwrap();
            expected.insert(created.id);
        }

        let all = service.get_all().await.unwrap();
        let ids: HashSet<String> = all.iter().map(|c| c.id.clone()).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn non_admin_delete_leaves_record_in_place() {
        let store = MemoryStore::default();
        let service = service(&store);
        let created = service.create(Some(&admin()), intro()).await.unwrap();

        let denied = service.delete(Some(&member()), &created.id).await;
        assert!(matches!(denied, Err(DomainError::Unauthorized(_))));
        assert!(service.get(&created.id).await.is_ok());

        service.delete(Some(&admin()), &created.id).await.unwrap();
        assert!(matches!(
            service.get(&created.id).await,
            Err(DomainError::ContentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_repository_error() {
        let mut units = MockUnitOfWorkFactory::new();
        units
            .expect_begin()
            .times(1)
            .returning(|| Err(DomainError::RepositoryError("pool exhausted".to_string())));
        let service = ContentService::new(Arc::new(units));

        let result = service.get("c-1").await;

        assert!(matches!(
            result,
            Err(DomainError::RepositoryError(msg)) if msg == "pool exhausted"
        ));
    }
}

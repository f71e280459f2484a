//! Content repository
//!
//! Typed CRUD over the content collections on top of a [`ContentStore`].
//! The repository owns entity <-> record translation.
//!
//! Reads never fail: a primary error falls back to the local store, then to
//! the built-in defaults. Writes that fail on the primary are applied once to
//! the local store so the edit survives, and the caller still gets
//! `AppError::PersistenceWrite`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

use super::storage::{sort_records, ContentStore, LocalStore, OrderBy, StoreResult};
use crate::domain::defaults;
use crate::domain::models::{
    CollectionKind, ContactInfo, ContactInfoPatch, ContentSnapshot, ContentSnippet, FormSubmission,
    FormSubmissionPatch, NewFormSubmission, OrderedItem, PartnerItem, PortfolioItem, ServiceItem,
};
use crate::shared::errors::{AppError, Result, ValidationErrors};
use crate::shared::logging::{self, LogOperation};

const BY_DISPLAY_ORDER: OrderBy = OrderBy::asc("display_order");
const NEWEST_FIRST: OrderBy = OrderBy::desc("created_at");

/// One store mutation, replayable against the fallback
#[derive(Debug, Clone)]
enum WriteOp {
    Upsert { conflict_key: &'static str, record: Value },
    Insert(Value),
    Delete(String),
    Replace(Vec<Value>),
}

impl WriteOp {
    fn action(&self) -> &'static str {
        match self {
            WriteOp::Upsert { .. } => "upsert",
            WriteOp::Insert(_) => "insert",
            WriteOp::Delete(_) => "delete",
            WriteOp::Replace(_) => "replace",
        }
    }

    /// Record written by an upsert/insert
    fn record(&self) -> Option<&Value> {
        match self {
            WriteOp::Upsert { record, .. } | WriteOp::Insert(record) => Some(record),
            WriteOp::Delete(_) | WriteOp::Replace(_) => None,
        }
    }

    async fn apply(&self, store: &dyn ContentStore, collection: CollectionKind) -> StoreResult<()> {
        match self {
            WriteOp::Upsert { conflict_key, record } => {
                store.upsert(collection, conflict_key, record.clone()).await
            }
            WriteOp::Insert(record) => store.insert(collection, record.clone()).await,
            WriteOp::Delete(id) => store.delete(collection, id).await,
            WriteOp::Replace(records) => store.replace_all(collection, records.clone()).await,
        }
    }
}

fn to_records<T: Serialize>(items: &[T]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect()
}

/// Built-in records for a collection; submissions have none
pub fn default_records(collection: CollectionKind) -> Vec<Value> {
    match collection {
        CollectionKind::Snippets => to_records(&defaults::default_snippets()),
        CollectionKind::Services => to_records(&defaults::default_services()),
        CollectionKind::Portfolio => to_records(&defaults::default_portfolio()),
        CollectionKind::Partners => to_records(&defaults::default_partners()),
        CollectionKind::Contact => to_records(&[defaults::default_contact()]),
        CollectionKind::Submissions => Vec::new(),
    }
}

/// Decode records, skipping any that no longer match the entity shape
fn decode<T: DeserializeOwned>(collection: CollectionKind, records: Vec<Value>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed {} record: {}", collection.label(), e);
                None
            }
        })
        .collect()
}

fn encode<T: Serialize>(item: &T) -> Result<Value> {
    Ok(serde_json::to_value(item)?)
}

pub struct ContentRepository {
    primary: Arc<dyn ContentStore>,
    fallback: Option<Arc<LocalStore>>,
}

impl ContentRepository {
    pub fn new(primary: Arc<dyn ContentStore>, fallback: Option<Arc<LocalStore>>) -> Self {
        Self { primary, fallback }
    }

    /// Repository whose primary store is the local one, with no separate fallback
    pub fn local(store: Arc<LocalStore>) -> Self {
        Self { primary: store, fallback: None }
    }

    pub fn backend_name(&self) -> &'static str {
        self.primary.backend_name()
    }

    // ---- reads --------------------------------------------------------------

    async fn read_records(&self, collection: CollectionKind, order: Option<OrderBy>) -> Vec<Value> {
        let span = crate::log_context!(LogOperation::ContentRead, collection.label());
        self.read_with_fallback(collection, order).instrument(span).await
    }

    async fn read_with_fallback(&self, collection: CollectionKind, order: Option<OrderBy>) -> Vec<Value> {
        let backend = self.primary.backend_name();
        let label = collection.label();

        let error = match self.primary.select_all(collection, order).await {
            Ok(records) => {
                logging::log_read(backend, label, records.len());
                self.mirror(collection, &records).await;
                return records;
            }
            Err(e) => AppError::PersistenceRead {
                collection: label,
                message: e.to_string(),
            },
        };
        logging::log_read_error(backend, label, &error.to_string());

        if let Some(fallback) = &self.fallback {
            match fallback.select_all(collection, order).await {
                Ok(records) => {
                    logging::log_read_fallback(label, fallback.backend_name());
                    return records;
                }
                Err(e) => logging::log_read_error(fallback.backend_name(), label, &e.to_string()),
            }
        }

        logging::log_read_fallback(label, "defaults");
        let mut records = default_records(collection);
        sort_records(&mut records, order);
        records
    }

    /// Copy a successful primary read into the local cache
    async fn mirror(&self, collection: CollectionKind, records: &[Value]) {
        let Some(fallback) = &self.fallback else {
            return;
        };
        if let Err(e) = fallback.replace_all(collection, records.to_vec()).await {
            tracing::debug!("Could not mirror {} into local cache: {}", collection.label(), e);
        }
    }

    async fn read<T: DeserializeOwned>(&self, collection: CollectionKind, order: Option<OrderBy>) -> Vec<T> {
        decode(collection, self.read_records(collection, order).await)
    }

    // ---- writes -------------------------------------------------------------

    fn write_error(&self, collection: CollectionKind, message: String, kept_locally: bool) -> AppError {
        logging::log_write_error(
            self.primary.backend_name(),
            collection.label(),
            &message,
            kept_locally,
        );
        AppError::PersistenceWrite {
            collection: collection.label(),
            message,
        }
    }

    async fn write(&self, collection: CollectionKind, op: WriteOp) -> Result<()> {
        let span = crate::log_context!(LogOperation::ContentWrite, collection.label());
        match op.apply(self.primary.as_ref(), collection).instrument(span).await {
            Ok(()) => {
                logging::log_write(self.primary.backend_name(), collection.label(), op.action());
                Ok(())
            }
            Err(e) => {
                let kept = match &self.fallback {
                    Some(fallback) => op.apply(fallback.as_ref(), collection).await.is_ok(),
                    None => false,
                };
                Err(self.write_error(collection, e.to_string(), kept))
            }
        }
    }

    /// Read-modify-write: `plan` sees the store's current records and decides
    /// the mutation. Runs against the primary, then against the fallback if the
    /// primary fails. `Ok(None)` means the plan chose not to write.
    async fn write_planned<F>(&self, collection: CollectionKind, plan: F) -> Result<Option<WriteOp>>
    where
        F: Fn(Vec<Value>) -> Option<WriteOp> + Send + Sync,
    {
        let span = crate::log_context!(LogOperation::ContentWrite, collection.label());
        match plan_and_apply(self.primary.as_ref(), collection, &plan)
            .instrument(span)
            .await
        {
            Ok(op) => {
                if let Some(op) = &op {
                    logging::log_write(self.primary.backend_name(), collection.label(), op.action());
                }
                Ok(op)
            }
            Err(e) => {
                let kept = match &self.fallback {
                    Some(fallback) => plan_and_apply(fallback.as_ref(), collection, &plan)
                        .await
                        .is_ok(),
                    None => false,
                };
                Err(self.write_error(collection, e.to_string(), kept))
            }
        }
    }

    // ---- snippets -----------------------------------------------------------

    /// All snippets in insertion order
    pub async fn get_snippets(&self) -> Vec<ContentSnippet> {
        self.read(CollectionKind::Snippets, None).await
    }

    /// Value for `key`, or `""` when absent
    pub async fn get_snippet_value(&self, key: &str) -> String {
        self.get_snippets()
            .await
            .into_iter()
            .find(|snippet| snippet.key == key)
            .map(|snippet| snippet.value)
            .unwrap_or_default()
    }

    /// Upsert by key. Existing snippets keep their id and `created_at`.
    pub async fn set_snippet(&self, key: &str, value: &str) -> Result<()> {
        if key.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("key", "Key is required");
            return Err(AppError::Validation(errors));
        }

        self.write_planned(CollectionKind::Snippets, |records| {
            let existing = decode::<ContentSnippet>(CollectionKind::Snippets, records)
                .into_iter()
                .find(|snippet| snippet.key == key);
            let snippet = match existing {
                Some(snippet) => snippet.with_value(value),
                None => ContentSnippet::new(key, value),
            };
            serde_json::to_value(&snippet).ok().map(|record| WriteOp::Upsert {
                conflict_key: "key",
                record,
            })
        })
        .await?;
        Ok(())
    }

    // ---- ordered lists ------------------------------------------------------

    async fn get_ordered<T: OrderedItem>(&self) -> Vec<T> {
        self.read(T::COLLECTION, Some(BY_DISPLAY_ORDER)).await
    }

    /// Whole-collection replace; timestamps are stored as given
    async fn set_ordered<T: OrderedItem>(&self, items: &[T]) -> Result<()> {
        let records = items.iter().map(encode).collect::<Result<Vec<_>>>()?;
        self.write(T::COLLECTION, WriteOp::Replace(records)).await
    }

    async fn delete_ordered<T: OrderedItem>(&self, id: &str) -> Result<()> {
        self.write(T::COLLECTION, WriteOp::Delete(id.to_string())).await
    }

    pub async fn get_services(&self) -> Vec<ServiceItem> {
        self.get_ordered().await
    }

    pub async fn set_services(&self, services: &[ServiceItem]) -> Result<()> {
        self.set_ordered(services).await
    }

    pub async fn delete_service(&self, id: &str) -> Result<()> {
        self.delete_ordered::<ServiceItem>(id).await
    }

    pub async fn get_portfolio(&self) -> Vec<PortfolioItem> {
        self.get_ordered().await
    }

    pub async fn set_portfolio(&self, items: &[PortfolioItem]) -> Result<()> {
        self.set_ordered(items).await
    }

    pub async fn delete_portfolio_item(&self, id: &str) -> Result<()> {
        self.delete_ordered::<PortfolioItem>(id).await
    }

    pub async fn get_partners(&self) -> Vec<PartnerItem> {
        self.get_ordered().await
    }

    pub async fn set_partners(&self, partners: &[PartnerItem]) -> Result<()> {
        self.set_ordered(partners).await
    }

    pub async fn delete_partner(&self, id: &str) -> Result<()> {
        self.delete_ordered::<PartnerItem>(id).await
    }

    // ---- contact singleton --------------------------------------------------

    pub async fn get_contact_info(&self) -> Option<ContactInfo> {
        self.read::<ContactInfo>(CollectionKind::Contact, None)
            .await
            .into_iter()
            .next()
    }

    /// Update the singleton if it exists, otherwise create it
    pub async fn set_contact_info(&self, patch: ContactInfoPatch) -> Result<ContactInfo> {
        let op = self
            .write_planned(CollectionKind::Contact, |records| {
                let existing = decode::<ContactInfo>(CollectionKind::Contact, records)
                    .into_iter()
                    .next();
                // A fresh singleton always gets the same id, so concurrent
                // creates converge on one record
                let info = match existing {
                    Some(mut info) => {
                        info.apply(patch.clone());
                        info
                    }
                    None => ContactInfo::from_patch(patch.clone()),
                };
                serde_json::to_value(&info).ok().map(|record| WriteOp::Upsert {
                    conflict_key: "id",
                    record,
                })
            })
            .await?;

        let record = op.as_ref().and_then(WriteOp::record).cloned().ok_or_else(|| {
            self.write_error(CollectionKind::Contact, "no record written".to_string(), false)
        })?;
        Ok(serde_json::from_value(record)?)
    }

    // ---- form submissions ---------------------------------------------------

    /// Newest first
    pub async fn get_form_submissions(&self) -> Vec<FormSubmission> {
        self.read(CollectionKind::Submissions, Some(NEWEST_FIRST)).await
    }

    pub async fn add_form_submission(&self, input: NewFormSubmission) -> Result<FormSubmission> {
        let submission = FormSubmission::create(input);
        self.write(CollectionKind::Submissions, WriteOp::Insert(encode(&submission)?))
            .await?;
        logging::log_submission_received(&submission.id);
        Ok(submission)
    }

    /// Merge `status`/`notes` into a submission. Unknown ids are skipped.
    pub async fn update_form_submission(
        &self,
        id: &str,
        patch: FormSubmissionPatch,
    ) -> Result<Option<FormSubmission>> {
        let op = self
            .write_planned(CollectionKind::Submissions, |records| {
                let mut submission = decode::<FormSubmission>(CollectionKind::Submissions, records)
                    .into_iter()
                    .find(|submission| submission.id == id)?;
                submission.apply(patch.clone());
                serde_json::to_value(&submission).ok().map(|record| WriteOp::Upsert {
                    conflict_key: "id",
                    record,
                })
            })
            .await?;

        match op.as_ref().and_then(WriteOp::record) {
            Some(record) => Ok(Some(serde_json::from_value(record.clone())?)),
            None => {
                logging::log_submission_missing(id);
                Ok(None)
            }
        }
    }

    // ---- aggregate ----------------------------------------------------------

    /// Every collection, read concurrently
    pub async fn snapshot(&self, include_submissions: bool) -> ContentSnapshot {
        let (snippets, services, portfolio, partners, contact) = futures::join!(
            self.get_snippets(),
            self.get_services(),
            self.get_portfolio(),
            self.get_partners(),
            self.get_contact_info(),
        );

        let form_submissions = if include_submissions {
            self.get_form_submissions().await
        } else {
            Vec::new()
        };

        ContentSnapshot {
            snippets,
            services,
            portfolio,
            partners,
            contact: contact.unwrap_or_else(defaults::default_contact),
            form_submissions,
        }
    }

    /// Write the default dataset into empty content collections of the primary
    /// store. Returns how many collections were seeded.
    pub async fn seed_if_empty(&self) -> usize {
        let backend = self.primary.backend_name();
        let mut seeded = 0;

        for collection in CollectionKind::ALL {
            if collection == CollectionKind::Submissions {
                continue;
            }
            match self.primary.select_all(collection, None).await {
                Ok(records) if records.is_empty() => {
                    let defaults = default_records(collection);
                    let count = defaults.len();
                    match self.primary.replace_all(collection, defaults).await {
                        Ok(()) => {
                            logging::log_seed(backend, collection.label(), count);
                            seeded += 1;
                        }
                        Err(e) => tracing::warn!("Failed to seed {}: {}", collection.label(), e),
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping seed of {}: {}", collection.label(), e),
            }
        }

        seeded
    }
}

async fn plan_and_apply<F>(
    store: &dyn ContentStore,
    collection: CollectionKind,
    plan: &F,
) -> StoreResult<Option<WriteOp>>
where
    F: Fn(Vec<Value>) -> Option<WriteOp> + Send + Sync,
{
    let existing = store.select_all(collection, None).await?;
    let Some(op) = plan(existing) else {
        return Ok(None);
    };
    op.apply(store, collection).await?;
    Ok(Some(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SubmissionStatus;
    use crate::domain::services::ContactFormInput;
    use crate::domain::models::CONTACT_ID;
    use crate::infrastructure::storage::{StoreError, SurrealStore};
    use async_trait::async_trait;

    /// Store whose every call fails, standing in for an unreachable remote
    struct FailingStore;

    #[async_trait]
    impl ContentStore for FailingStore {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        async fn select_all(&self, _: CollectionKind, _: Option<OrderBy>) -> StoreResult<Vec<Value>> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn upsert(&self, _: CollectionKind, _: &str, _: Value) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn insert(&self, _: CollectionKind, _: Value) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn delete(&self, _: CollectionKind, _: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn replace_all(&self, _: CollectionKind, _: Vec<Value>) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    fn empty_repository() -> ContentRepository {
        ContentRepository::local(Arc::new(LocalStore::in_memory(|_| Vec::new())))
    }

    fn seeded_repository() -> ContentRepository {
        ContentRepository::local(Arc::new(LocalStore::in_memory(default_records)))
    }

    fn submission_input(name: &str) -> NewFormSubmission {
        NewFormSubmission {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            subject: Some("Website Quote".to_string()),
            message: "Please send a quote for a website.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_set_then_get_snippet() {
        let repo = empty_repository();
        repo.set_snippet("about.title", "About Naya Code").await.unwrap();
        assert_eq!(repo.get_snippet_value("about.title").await, "About Naya Code");
        assert_eq!(repo.get_snippet_value("unknown.key").await, "");
    }

    #[tokio::test]
    async fn test_set_snippet_twice_keeps_one_record() {
        let repo = empty_repository();
        repo.set_snippet("hero.title", "A").await.unwrap();
        let first = repo.get_snippets().await;
        repo.set_snippet("hero.title", "B").await.unwrap();

        let snippets = repo.get_snippets().await;
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].value, "B");
        assert_eq!(snippets[0].id, first[0].id);
        assert_eq!(snippets[0].created_at, first[0].created_at);
        assert!(snippets[0].updated_at >= first[0].updated_at);
    }

    #[tokio::test]
    async fn test_set_snippet_rejects_blank_key() {
        let repo = empty_repository();
        assert!(matches!(
            repo.set_snippet("  ", "x").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_set_services_returns_sorted_and_is_idempotent() {
        let repo = empty_repository();
        let services = vec![
            ServiceItem::new("Design", 3),
            ServiceItem::new("Security", 1),
            ServiceItem::new("Marketing", 2),
            ServiceItem::new("Cloud", 1),
        ];

        repo.set_services(&services).await.unwrap();
        let first = repo.get_services().await;
        let titles: Vec<_> = first.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Security", "Cloud", "Marketing", "Design"]);

        repo.set_services(&services).await.unwrap();
        assert_eq!(repo.get_services().await, first);
    }

    #[tokio::test]
    async fn test_delete_service_removes_exactly_one() {
        let repo = seeded_repository();
        repo.delete_service("default-service-2").await.unwrap();
        let after = repo.get_services().await;
        assert_eq!(after.len(), 3);
        assert!(after.iter().all(|s| s.id != "default-service-2"));

        repo.delete_service("default-service-2").await.unwrap();
        assert_eq!(repo.get_services().await, after);
    }

    #[tokio::test]
    async fn test_portfolio_and_partners_round_trip() {
        let repo = empty_repository();
        let mut featured = PortfolioItem::new("Clinic Portal", 1);
        featured.featured = true;
        repo.set_portfolio(&[PortfolioItem::new("Shop", 2), featured.clone()])
            .await
            .unwrap();
        repo.set_partners(&[PartnerItem::new("Acme", 1)]).await.unwrap();

        let portfolio = repo.get_portfolio().await;
        assert_eq!(portfolio[0], featured);
        repo.delete_portfolio_item(&featured.id).await.unwrap();
        assert_eq!(repo.get_portfolio().await.len(), 1);

        let partners = repo.get_partners().await;
        repo.delete_partner(&partners[0].id).await.unwrap();
        assert!(repo.get_partners().await.is_empty());
    }

    #[tokio::test]
    async fn test_contact_info_stays_singleton() {
        let repo = empty_repository();
        assert!(repo.get_contact_info().await.is_none());

        let created = repo
            .set_contact_info(ContactInfoPatch {
                address: Some("Dillibazar, Kathmandu".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let updated = repo
            .set_contact_info(ContactInfoPatch {
                email: Some(vec!["info@nayacode.com.np".to_string()]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!(updated.address, "Dillibazar, Kathmandu");

        let stored = repo.read_records(CollectionKind::Contact, None).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(repo.get_contact_info().await, Some(updated));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_contact_creates_leave_one_record() {
        let store = SurrealStore::in_memory().await.unwrap();
        let repo = Arc::new(ContentRepository::new(Arc::new(store), None));

        let writers = ["Dillibazar", "Baneshwor", "Lalitpur", "Bhaktapur"].map(|address| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.set_contact_info(ContactInfoPatch {
                    address: Some(address.to_string()),
                    ..Default::default()
                })
                .await
            })
        });
        for result in futures::future::join_all(writers).await {
            assert_eq!(result.unwrap().unwrap().id, CONTACT_ID);
        }

        let stored = repo.read_records(CollectionKind::Contact, None).await;
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_add_form_submission_is_new_and_first() {
        let repo = empty_repository();
        let first = repo.add_form_submission(submission_input("Sita")).await.unwrap();
        let second = repo.add_form_submission(submission_input("Hari")).await.unwrap();

        assert_eq!(second.status, SubmissionStatus::New);
        assert_ne!(first.id, second.id);

        let all = repo.get_form_submissions().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn test_contact_form_scenario() {
        let repo = empty_repository();
        let form = ContactFormInput {
            name: "Ram Shrestha".to_string(),
            email: "ram@example.com".to_string(),
            phone: String::new(),
            subject: "Website Quote".to_string(),
            message: "Please send a quote for a company website.".to_string(),
        };

        let stored = repo.add_form_submission(form.validate().unwrap()).await.unwrap();
        let all = repo.get_form_submissions().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], stored);
        assert_eq!(all[0].name, "Ram Shrestha");
        assert_eq!(all[0].status, SubmissionStatus::New);
        assert_eq!(all[0].phone, None);
    }

    #[tokio::test]
    async fn test_update_submission_touches_only_status() {
        let repo = empty_repository();
        let original = repo.add_form_submission(submission_input("Gita")).await.unwrap();

        let updated = repo
            .update_form_submission(
                &original.id,
                FormSubmissionPatch {
                    status: Some(SubmissionStatus::Archived),
                    notes: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, SubmissionStatus::Archived);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(
            FormSubmission {
                status: original.status,
                updated_at: original.updated_at,
                ..updated.clone()
            },
            original
        );
    }

    #[tokio::test]
    async fn test_update_unknown_submission_is_noop() {
        let repo = empty_repository();
        let result = repo
            .update_form_submission("missing", FormSubmissionPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(repo.get_form_submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_serves_defaults() {
        let repo = ContentRepository::new(Arc::new(FailingStore), None);
        let services = repo.get_services().await;
        let titles: Vec<_> = services.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Software Development", "IT Security", "Digital Marketing", "UI/UX Design"]
        );
        assert_eq!(repo.get_contact_info().await, Some(defaults::default_contact()));
        assert!(repo.get_form_submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_kept_in_local_cache() {
        let fallback = Arc::new(LocalStore::in_memory(default_records));
        let repo = ContentRepository::new(Arc::new(FailingStore), Some(fallback.clone()));

        let err = repo.set_snippet("hero.title", "Offline edit").await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceWrite { collection: "content", .. }));
        assert_eq!(err.user_message(), "Failed to update content");

        // Reads now come from the local cache, which holds the edit
        assert_eq!(repo.get_snippet_value("hero.title").await, "Offline edit");
        let cached = fallback.select_all(CollectionKind::Snippets, None).await.unwrap();
        assert_eq!(cached.len(), defaults::default_snippets().len());
    }

    #[tokio::test]
    async fn test_primary_reads_are_mirrored() {
        let primary = Arc::new(LocalStore::in_memory(default_records));
        let fallback = Arc::new(LocalStore::in_memory(|_| Vec::new()));
        let repo = ContentRepository::new(primary, Some(fallback.clone()));

        repo.get_partners().await;
        let mirrored = fallback.select_all(CollectionKind::Partners, None).await.unwrap();
        assert_eq!(mirrored.len(), defaults::default_partners().len());
    }

    #[tokio::test]
    async fn test_snapshot_hides_submissions_unless_asked() {
        let repo = seeded_repository();
        repo.add_form_submission(submission_input("Sita")).await.unwrap();

        let public = repo.snapshot(false).await;
        assert!(public.form_submissions.is_empty());
        assert_eq!(public.services.len(), 4);
        assert_eq!(public.contact, defaults::default_contact());

        let editor = repo.snapshot(true).await;
        assert_eq!(editor.form_submissions.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_if_empty_skips_submissions_and_filled_collections() {
        let repo = empty_repository();
        repo.set_partners(&[PartnerItem::new("Acme", 1)]).await.unwrap();

        assert_eq!(repo.seed_if_empty().await, 4);
        assert_eq!(repo.get_services().await.len(), 4);
        assert_eq!(repo.get_partners().await.len(), 1);
        assert!(repo.get_form_submissions().await.is_empty());

        assert_eq!(repo.seed_if_empty().await, 0);
    }
}

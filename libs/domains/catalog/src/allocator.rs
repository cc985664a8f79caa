//! Version number allocation.
//!
//! Auto-allocation computes `MAX(version) + 1` inside a serializable
//! transaction, which Postgres may abort with a serialization failure when
//! two allocations race. The allocator retries a bounded number of times
//! with random jitter to spread colliding writers apart.

use std::sync::Arc;
use std::time::Duration;

use rand::RngExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::ApplicationVersion;
use crate::repository::VersionRepository;

/// Maximum allocation attempts before giving up with
/// [`CatalogError::TooManyConcurrentRequests`].
const MAX_ATTEMPTS: u32 = 5;

/// Upper bound (exclusive) of the random sleep between attempts.
const MAX_JITTER_MS: u64 = 100;

/// Allocates version numbers for applications.
#[derive(Clone)]
pub struct VersionAllocator<R> {
    repository: Arc<R>,
}

impl<R: VersionRepository> VersionAllocator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a version row, auto-allocating the number unless an explicit
    /// one is given.
    ///
    /// The explicit path is a plain insert: a taken number is a conflict
    /// and is not retried. The auto path retries serialization failures up
    /// to [`MAX_ATTEMPTS`] times, sleeping `[0, 100)` ms between attempts.
    pub async fn allocate(
        &self,
        application_id: Uuid,
        explicit: Option<i32>,
    ) -> CatalogResult<ApplicationVersion> {
        match explicit {
            Some(version) => {
                self.repository
                    .insert_explicit(application_id, version)
                    .await
            }
            None => self.allocate_next(application_id).await,
        }
    }

    async fn allocate_next(&self, application_id: Uuid) -> CatalogResult<ApplicationVersion> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.repository.insert_next(application_id).await {
                Err(CatalogError::SerializationConflict) => {
                    debug!(
                        %application_id,
                        attempt,
                        "Version allocation lost to a concurrent writer"
                    );

                    if attempt < MAX_ATTEMPTS {
                        let jitter = rand::rng().random_range(0..MAX_JITTER_MS);
                        tokio::time::sleep(Duration::from_millis(jitter)).await;
                    }
                }
                other => return other,
            }
        }

        warn!(
            %application_id,
            attempts = MAX_ATTEMPTS,
            "Version allocation retries exhausted"
        );
        Err(CatalogError::TooManyConcurrentRequests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockVersionRepository;
    use chrono::Utc;

    fn version_row(application_id: Uuid, version: i32) -> ApplicationVersion {
        ApplicationVersion {
            id: Uuid::now_v7(),
            application_id,
            version,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_auto_allocation_succeeds_first_attempt() {
        let application_id = Uuid::now_v7();
        let mut repo = MockVersionRepository::new();
        repo.expect_insert_next()
            .times(1)
            .returning(move |app_id| Ok(version_row(app_id, 1)));

        let allocator = VersionAllocator::new(Arc::new(repo));
        let version = allocator.allocate(application_id, None).await.unwrap();
        assert_eq!(version.version, 1);
    }

    #[tokio::test]
    async fn test_auto_allocation_retries_serialization_conflicts() {
        let application_id = Uuid::now_v7();
        let mut attempts = 0;
        let mut repo = MockVersionRepository::new();
        repo.expect_insert_next().times(3).returning(move |app_id| {
            attempts += 1;
            if attempts < 3 {
                Err(CatalogError::SerializationConflict)
            } else {
                Ok(version_row(app_id, 4))
            }
        });

        let allocator = VersionAllocator::new(Arc::new(repo));
        let version = allocator.allocate(application_id, None).await.unwrap();
        assert_eq!(version.version, 4);
    }

    #[tokio::test]
    async fn test_auto_allocation_gives_up_after_five_attempts() {
        let application_id = Uuid::now_v7();
        let mut repo = MockVersionRepository::new();
        repo.expect_insert_next()
            .times(5)
            .returning(|_| Err(CatalogError::SerializationConflict));

        let allocator = VersionAllocator::new(Arc::new(repo));
        let err = allocator.allocate(application_id, None).await.unwrap_err();
        assert!(matches!(err, CatalogError::TooManyConcurrentRequests));
    }

    #[tokio::test]
    async fn test_auto_allocation_does_not_retry_other_errors() {
        let application_id = Uuid::now_v7();
        let mut repo = MockVersionRepository::new();
        repo.expect_insert_next()
            .times(1)
            .returning(|_| Err(CatalogError::NotFound("application".to_string())));

        let allocator = VersionAllocator::new(Arc::new(repo));
        let err = allocator.allocate(application_id, None).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_explicit_allocation_does_not_retry_conflicts() {
        let application_id = Uuid::now_v7();
        let mut repo = MockVersionRepository::new();
        repo.expect_insert_explicit()
            .times(1)
            .returning(|_, _| Err(CatalogError::Conflict("version 3 exists".to_string())));
        repo.expect_insert_next().times(0);

        let allocator = VersionAllocator::new(Arc::new(repo));
        let err = allocator
            .allocate(application_id, Some(3))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_explicit_allocation_passes_version_through() {
        let application_id = Uuid::now_v7();
        let mut repo = MockVersionRepository::new();
        repo.expect_insert_explicit()
            .times(1)
            .withf(|_, version| *version == 42)
            .returning(move |app_id, version| Ok(version_row(app_id, version)));

        let allocator = VersionAllocator::new(Arc::new(repo));
        let version = allocator
            .allocate(application_id, Some(42))
            .await
            .unwrap();
        assert_eq!(version.version, 42);
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_semantic::Embedding;
use uuid::Uuid;

use crate::error::RetrievalResult;
use crate::models::RetrievalFilter;

/// A connector row with its raw cosine distance to the query.
#[derive(Debug, Clone)]
pub struct RankedConnector {
    pub id: Uuid,
    pub version_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Minimum cosine distance across the connector's index rows
    pub distance: f64,
}

/// Repository trait for retrieval queries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RetrievalRepository: Send + Sync {
    /// Resolve a filter into the distinct version IDs it selects.
    ///
    /// Selectors are OR-combined; an unknown application or version simply
    /// contributes no IDs.
    async fn resolve_version_ids(&self, filter: &RetrievalFilter) -> RetrievalResult<Vec<Uuid>>;

    /// Rank connectors by cosine distance to the query embedding,
    /// ascending, ties broken by connector ID.
    ///
    /// `version_ids` of `None` ranks the whole catalog; `Some(ids)` only
    /// connectors attached to those versions.
    async fn rank_connectors(
        &self,
        embedding: &Embedding,
        version_ids: Option<Vec<Uuid>>,
        limit: u64,
    ) -> RetrievalResult<Vec<RankedConnector>>;
}

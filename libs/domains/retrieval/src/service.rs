use std::sync::Arc;

use domain_semantic::{Embedder, InputKind};
use tracing::debug;
use validator::Validate;

use crate::error::{RetrievalError, RetrievalResult};
use crate::models::{CandidateSet, RetrieveRequest, RetrievedConnector};
use crate::repository::{RankedConnector, RetrievalRepository};

/// Service layer for semantic connector retrieval.
#[derive(Clone)]
pub struct RetrievalService<R: RetrievalRepository, E: Embedder> {
    repository: Arc<R>,
    embedder: Arc<E>,
}

impl<R: RetrievalRepository, E: Embedder> RetrievalService<R, E> {
    pub fn new(repository: Arc<R>, embedder: Arc<E>) -> Self {
        Self {
            repository,
            embedder,
        }
    }

    /// Retrieve connectors matching the query, most relevant first.
    ///
    /// The filter is resolved before the query is embedded: when it
    /// matches no versions (including an explicitly empty selector list)
    /// the result is empty and the embedding provider is never called.
    pub async fn retrieve(
        &self,
        request: RetrieveRequest,
    ) -> RetrievalResult<Vec<RetrievedConnector>> {
        request
            .validate()
            .map_err(|e| RetrievalError::Validation(e.to_string()))?;

        let candidates = match &request.filter {
            None => CandidateSet::Unrestricted,
            Some(filter) => {
                if filter.applications.is_empty() {
                    debug!("Retrieval filter has no selectors, returning empty result");
                    return Ok(vec![]);
                }

                let ids = self.repository.resolve_version_ids(filter).await?;
                if ids.is_empty() {
                    debug!("Retrieval filter matched no versions, returning empty result");
                    return Ok(vec![]);
                }
                CandidateSet::Restricted(ids)
            }
        };

        let embedding = self
            .embedder
            .embed(&request.query, InputKind::Query)
            .await?;

        let restriction = match candidates {
            CandidateSet::Unrestricted => None,
            CandidateSet::Restricted(ids) => Some(ids),
        };

        let ranked = self
            .repository
            .rank_connectors(&embedding, restriction, request.limit)
            .await?;

        Ok(ranked.into_iter().map(into_retrieved).collect())
    }
}

fn into_retrieved(ranked: RankedConnector) -> RetrievedConnector {
    RetrievedConnector {
        id: ranked.id,
        version_id: ranked.version_id,
        name: ranked.name,
        description: ranked.description,
        created_at: ranked.created_at,
        // Cosine distance is in [0, 2]; similarity lands in [-1, 1]
        similarity: 1.0 - ranked.distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationSelector, RetrievalFilter};
    use crate::repository::MockRetrievalRepository;
    use chrono::Utc;
    use domain_semantic::{Embedding, MockEmbedder};
    use uuid::Uuid;

    fn stub_embedding() -> Embedding {
        Embedding::new(vec![0.1; 384]).unwrap()
    }

    fn ranked(name: &str, distance: f64) -> RankedConnector {
        RankedConnector {
            id: Uuid::now_v7(),
            version_id: Uuid::now_v7(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            distance,
        }
    }

    fn request(filter: Option<RetrievalFilter>) -> RetrieveRequest {
        RetrieveRequest {
            query: "send an email".to_string(),
            limit: 10,
            filter,
        }
    }

    #[tokio::test]
    async fn test_empty_selector_list_skips_embedding() {
        let mut embedder = MockEmbedder::new();
        embedder.expect_embed().times(0);

        let mut repo = MockRetrievalRepository::new();
        repo.expect_resolve_version_ids().times(0);
        repo.expect_rank_connectors().times(0);

        let service = RetrievalService::new(Arc::new(repo), Arc::new(embedder));
        let results = service
            .retrieve(request(Some(RetrievalFilter {
                applications: vec![],
            })))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_filter_skips_embedding() {
        let mut embedder = MockEmbedder::new();
        embedder.expect_embed().times(0);

        let mut repo = MockRetrievalRepository::new();
        repo.expect_resolve_version_ids()
            .times(1)
            .returning(|_| Ok(vec![]));
        repo.expect_rank_connectors().times(0);

        let service = RetrievalService::new(Arc::new(repo), Arc::new(embedder));
        let results = service
            .retrieve(request(Some(RetrievalFilter {
                applications: vec![ApplicationSelector::ByName {
                    name: "nonexistent".to_string(),
                    version: None,
                }],
            })))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_no_filter_ranks_unrestricted() {
        let mut embedder = MockEmbedder::new();
        embedder
            .expect_embed()
            .withf(|text, kind| text == "send an email" && *kind == InputKind::Query)
            .times(1)
            .returning(|_, _| Ok(stub_embedding()));

        let mut repo = MockRetrievalRepository::new();
        repo.expect_resolve_version_ids().times(0);
        repo.expect_rank_connectors()
            .withf(|_, restriction, limit| restriction.is_none() && *limit == 10)
            .times(1)
            .returning(|_, _, _| Ok(vec![ranked("email-send", 0.2)]));

        let service = RetrievalService::new(Arc::new(repo), Arc::new(embedder));
        let results = service.retrieve(request(None)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!((results[0].similarity - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_matched_filter_restricts_ranking() {
        let version_id = Uuid::now_v7();
        let expected = vec![version_id];

        let mut embedder = MockEmbedder::new();
        embedder
            .expect_embed()
            .times(1)
            .returning(|_, _| Ok(stub_embedding()));

        let mut repo = MockRetrievalRepository::new();
        repo.expect_resolve_version_ids()
            .times(1)
            .returning(move |_| Ok(vec![version_id]));
        repo.expect_rank_connectors()
            .withf(move |_, restriction, _| restriction.as_deref() == Some(expected.as_slice()))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let service = RetrievalService::new(Arc::new(repo), Arc::new(embedder));
        let results = service
            .retrieve(request(Some(RetrievalFilter {
                applications: vec![ApplicationSelector::ById {
                    id: Uuid::now_v7(),
                    version: Some(1),
                }],
            })))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_limit_rejected_before_any_work() {
        let mut embedder = MockEmbedder::new();
        embedder.expect_embed().times(0);

        let mut repo = MockRetrievalRepository::new();
        repo.expect_resolve_version_ids().times(0);
        repo.expect_rank_connectors().times(0);

        let service = RetrievalService::new(Arc::new(repo), Arc::new(embedder));
        let err = service
            .retrieve(RetrieveRequest {
                query: "send an email".to_string(),
                limit: 0,
                filter: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Validation(_)));
    }
}

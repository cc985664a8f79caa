//! Integration tests for semantic retrieval against pgvector.
//!
//! Uses a stub embedder with hand-picked vectors so cosine distances are
//! known exactly; only the ranking SQL and filter resolution are under test.

use std::sync::Arc;

use async_trait::async_trait;
use domain_catalog::models::{CreateApplication, CreateConnector};
use domain_catalog::repository::{
    ApplicationRepository, ConnectorRepository, VersionRepository,
};
use domain_catalog::{PgApplicationRepository, PgConnectorRepository, PgVersionRepository};
use domain_retrieval::{
    ApplicationSelector, PgRetrievalRepository, RetrievalFilter, RetrievalService,
    RetrieveRequest, RetrievedConnector,
};
use domain_semantic::models::EMBEDDING_DIMENSION;
use domain_semantic::{Embedder, Embedding, InputKind, SemanticResult};
use test_utils::TestDatabase;
use uuid::Uuid;

/// Embedder that always returns the same fixed vector for the query.
struct StubEmbedder {
    vector: Vec<f32>,
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, _text: &str, _kind: InputKind) -> SemanticResult<Embedding> {
        Embedding::new(self.vector.clone())
    }
}

/// Unit vector along one axis.
fn axis(i: usize) -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIMENSION];
    v[i] = 1.0;
    v
}

/// Normalized blend of two axes. Cosine similarity to `axis(a)` is `wa`.
fn blend(a: usize, wa: f32, b: usize, wb: f32) -> Vec<f32> {
    let norm = (wa * wa + wb * wb).sqrt();
    let mut v = vec![0.0; EMBEDDING_DIMENSION];
    v[a] = wa / norm;
    v[b] = wb / norm;
    v
}

struct Repos {
    applications: PgApplicationRepository,
    versions: PgVersionRepository,
    connectors: PgConnectorRepository,
}

fn repos(db: &TestDatabase) -> Repos {
    Repos {
        applications: PgApplicationRepository::new(db.connection()),
        versions: PgVersionRepository::new(db.connection()),
        connectors: PgConnectorRepository::new(db.connection()),
    }
}

async fn seed_application(repos: &Repos, name: &str) -> (Uuid, Uuid) {
    let app = repos
        .applications
        .create(CreateApplication {
            name: name.to_string(),
            description: None,
        })
        .await
        .unwrap();
    let version = repos.versions.insert_next(app.id).await.unwrap();
    (app.id, version.id)
}

async fn seed_connector(repos: &Repos, version_id: Uuid, name: &str, vector: Vec<f32>) -> Uuid {
    let connector = repos
        .connectors
        .create(
            version_id,
            CreateConnector {
                name: name.to_string(),
                description: Some(format!("{} connector", name)),
            },
            format!("{} connector", name),
            Embedding::new(vector).unwrap(),
        )
        .await
        .unwrap();
    connector.id
}

fn service(
    db: &TestDatabase,
    query_vector: Vec<f32>,
) -> RetrievalService<PgRetrievalRepository, StubEmbedder> {
    RetrievalService::new(
        Arc::new(PgRetrievalRepository::new(db.connection())),
        Arc::new(StubEmbedder {
            vector: query_vector,
        }),
    )
}

fn names(results: &[RetrievedConnector]) -> Vec<&str> {
    results.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn test_unrestricted_search_ranks_by_similarity() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (_, version_id) = seed_application(&repos, "gmail").await;

    seed_connector(&repos, version_id, "email-send", axis(0)).await;
    seed_connector(&repos, version_id, "email-draft", blend(0, 0.8, 1, 0.6)).await;
    seed_connector(&repos, version_id, "calendar-create", axis(1)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send an email".to_string(),
            limit: 10,
            filter: None,
        })
        .await
        .unwrap();

    assert_eq!(
        names(&results),
        vec!["email-send", "email-draft", "calendar-create"]
    );
    assert!((results[0].similarity - 1.0).abs() < 1e-4);
    assert!((results[1].similarity - 0.8).abs() < 1e-4);
    assert!(results[0].similarity > results[1].similarity);
    assert!(results[1].similarity > results[2].similarity);
}

#[tokio::test]
async fn test_limit_caps_results() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (_, version_id) = seed_application(&repos, "gmail").await;

    seed_connector(&repos, version_id, "email-send", axis(0)).await;
    seed_connector(&repos, version_id, "email-draft", blend(0, 0.8, 1, 0.6)).await;
    seed_connector(&repos, version_id, "calendar-create", axis(1)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send an email".to_string(),
            limit: 2,
            filter: None,
        })
        .await
        .unwrap();

    assert_eq!(names(&results), vec!["email-send", "email-draft"]);
}

#[tokio::test]
async fn test_filter_by_application_restricts_candidates() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (gmail_id, gmail_v1) = seed_application(&repos, "gmail").await;
    let (_, slack_v1) = seed_application(&repos, "slack").await;

    // The slack connector is the best global match but is filtered out
    seed_connector(&repos, slack_v1, "message-send", axis(0)).await;
    seed_connector(&repos, gmail_v1, "email-send", blend(0, 0.9, 1, 0.436)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send a message".to_string(),
            limit: 10,
            filter: Some(RetrievalFilter {
                applications: vec![ApplicationSelector::ById {
                    id: gmail_id,
                    version: None,
                }],
            }),
        })
        .await
        .unwrap();

    assert_eq!(names(&results), vec!["email-send"]);
}

#[tokio::test]
async fn test_filter_pins_a_single_version() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (app_id, v1_id) = seed_application(&repos, "gmail").await;
    let v2 = repos.versions.insert_next(app_id).await.unwrap();

    seed_connector(&repos, v1_id, "email-send-v1", axis(0)).await;
    seed_connector(&repos, v2.id, "email-send-v2", axis(0)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send an email".to_string(),
            limit: 10,
            filter: Some(RetrievalFilter {
                applications: vec![ApplicationSelector::ById {
                    id: app_id,
                    version: Some(1),
                }],
            }),
        })
        .await
        .unwrap();

    assert_eq!(names(&results), vec!["email-send-v1"]);
}

#[tokio::test]
async fn test_selectors_combine_as_a_union() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (gmail_id, gmail_v1) = seed_application(&repos, "gmail").await;
    let (_, slack_v1) = seed_application(&repos, "slack").await;
    let (_, jira_v1) = seed_application(&repos, "jira").await;

    seed_connector(&repos, gmail_v1, "email-send", axis(0)).await;
    seed_connector(&repos, slack_v1, "message-send", blend(0, 0.9, 1, 0.436)).await;
    seed_connector(&repos, jira_v1, "issue-create", blend(0, 0.95, 1, 0.312)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send something".to_string(),
            limit: 10,
            filter: Some(RetrievalFilter {
                applications: vec![
                    ApplicationSelector::ById {
                        id: gmail_id,
                        version: None,
                    },
                    ApplicationSelector::ByName {
                        name: "slack".to_string(),
                        version: None,
                    },
                ],
            }),
        })
        .await
        .unwrap();

    // jira's connector outranks slack's but matches no selector
    assert_eq!(names(&results), vec!["email-send", "message-send"]);
}

#[tokio::test]
async fn test_unmatched_filter_returns_no_results() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (_, version_id) = seed_application(&repos, "gmail").await;
    seed_connector(&repos, version_id, "email-send", axis(0)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send an email".to_string(),
            limit: 10,
            filter: Some(RetrievalFilter {
                applications: vec![ApplicationSelector::ByName {
                    name: "nonexistent".to_string(),
                    version: None,
                }],
            }),
        })
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_empty_selector_list_returns_no_results() {
    let db = TestDatabase::new().await;
    let repos = repos(&db);
    let (_, version_id) = seed_application(&repos, "gmail").await;
    seed_connector(&repos, version_id, "email-send", axis(0)).await;

    let service = service(&db, axis(0));
    let results = service
        .retrieve(RetrieveRequest {
            query: "send an email".to_string(),
            limit: 10,
            filter: Some(RetrievalFilter {
                applications: vec![],
            }),
        })
        .await
        .unwrap();

    assert!(results.is_empty());
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Selects the versions of one application to search.
///
/// With `version` set, exactly that `(application, version)` pair; without
/// it, every version of the application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ApplicationSelector {
    /// Select an application by its ID
    #[serde(rename_all = "camelCase")]
    ById {
        id: Uuid,
        version: Option<i32>,
    },
    /// Select an application by its unique name
    #[serde(rename_all = "camelCase")]
    ByName {
        name: String,
        version: Option<i32>,
    },
}

/// Restricts retrieval to the versions matched by any of the selectors.
///
/// An empty selector list matches nothing: retrieval returns no results
/// rather than falling back to an unrestricted search.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RetrievalFilter {
    pub applications: Vec<ApplicationSelector>,
}

/// The candidate set a filter resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSet {
    /// No filter given; every connector competes
    Unrestricted,
    /// Only connectors of these version IDs compete
    Restricted(Vec<Uuid>),
}

/// A connector retrieval request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    /// Natural-language description of the desired connector functionality
    #[validate(length(min = 1))]
    pub query: String,
    /// Maximum number of connectors to return, 1 to 100
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    /// Optional restriction of the candidate set
    pub filter: Option<RetrievalFilter>,
}

/// A retrieved connector with its relevance score.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedConnector {
    pub id: Uuid,
    pub version_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Cosine similarity between the query and the connector's indexed
    /// text, `1 - cosine_distance`, in `[-1, 1]`. Higher is more relevant.
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_deserializes_tagged_by_id() {
        let json = serde_json::json!({
            "type": "byId",
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "version": 2
        });
        let selector: ApplicationSelector = serde_json::from_value(json).unwrap();
        assert!(matches!(
            selector,
            ApplicationSelector::ById {
                version: Some(2),
                ..
            }
        ));
    }

    #[test]
    fn test_selector_deserializes_tagged_by_name() {
        let json = serde_json::json!({ "type": "byName", "name": "gmail" });
        let selector: ApplicationSelector = serde_json::from_value(json).unwrap();
        assert!(matches!(
            selector,
            ApplicationSelector::ByName { version: None, .. }
        ));
    }

    #[test]
    fn test_request_limit_bounds() {
        let request = RetrieveRequest {
            query: "send an email".to_string(),
            limit: 101,
            filter: None,
        };
        assert!(request.validate().is_err());

        let request = RetrieveRequest {
            query: "send an email".to_string(),
            limit: 0,
            filter: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_rejects_empty_query() {
        let request = RetrieveRequest {
            query: String::new(),
            limit: 10,
            filter: None,
        };
        assert!(request.validate().is_err());
    }
}

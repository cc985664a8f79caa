//! Retrieval Domain
//!
//! Semantic connector retrieval: embeds a natural-language query, resolves
//! an optional application/version filter into a candidate set, and ranks
//! connectors by cosine distance of their indexed embeddings in Postgres.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RetrievalError, RetrievalResult};
pub use models::{
    ApplicationSelector, CandidateSet, RetrievalFilter, RetrieveRequest, RetrievedConnector,
};
pub use postgres::PgRetrievalRepository;
pub use repository::{RankedConnector, RetrievalRepository};
pub use service::RetrievalService;

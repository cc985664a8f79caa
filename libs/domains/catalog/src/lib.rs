//! Catalog Domain
//!
//! Applications, their immutable numbered versions, and connectors attached
//! to a version.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, version allocation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```

pub mod allocator;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod keyset;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use allocator::VersionAllocator;
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Application, ApplicationVersion, Connector, CreateApplication, CreateConnector, CreateVersion,
    UpdateApplication,
};
pub use postgres::{PgApplicationRepository, PgConnectorRepository, PgVersionRepository};
pub use repository::{ApplicationRepository, ConnectorRepository, VersionRepository};
pub use service::{ApplicationService, ConnectorService, VersionService};

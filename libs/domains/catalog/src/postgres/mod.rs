//! Postgres implementations of the catalog repositories.

mod applications;
mod connectors;
mod versions;

pub use applications::PgApplicationRepository;
pub use connectors::PgConnectorRepository;
pub use versions::PgVersionRepository;

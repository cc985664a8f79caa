//! SeaORM entities for the catalog tables.
//!
//! `connector_indexes` has no entity here; its `vector` column is not
//! representable in sea-query, so it is touched through raw SQL only.

pub mod applications;
pub mod connectors;
pub mod versions;

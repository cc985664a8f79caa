//! Configuration for the Hive API

use core_config::{server::ServerConfig, FromEnv};
use database::postgres::PostgresConfig;
use domain_semantic::CohereConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub cohere: CohereConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?;
        let cohere = CohereConfig::from_env()?;

        Ok(Self {
            environment,
            server,
            database,
            cohere,
        })
    }
}

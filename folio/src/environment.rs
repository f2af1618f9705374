//! Concrete service types and their wiring.

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use folio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use folio_persistence_postgres::{contact::PostgresContactRepository, PostgresDatabase};
use folio_shared_impl::time::SystemTimeService;

pub type Database = PostgresDatabase;
pub type Time = SystemTimeService;

// Persistence
pub type ContactRepo = PostgresContactRepository;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Database, ContactRepo>;
pub type HealthFeature = HealthFeatureServiceImpl<Time, Database>;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ContactFeature>;

pub fn contact_feature(config: &Config, database: Database) -> ContactFeature {
    ContactFeatureServiceImpl::new(
        database,
        PostgresContactRepository,
        ContactFeatureConfig {
            expose_storage_errors: config.contact.expose_storage_errors,
        },
    )
}

pub fn health_feature(config: &Config, database: Database) -> HealthFeature {
    HealthFeatureServiceImpl::new(
        SystemTimeService,
        database,
        HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    )
}

pub fn rest_server(config: &Config, database: Database) -> anyhow::Result<RestServer> {
    Ok(folio_api_rest::RestServer::new(
        health_feature(config, database.clone()),
        contact_feature(config, database),
        RestServerConfig::new(&config.http.allowed_origins)?,
    ))
}

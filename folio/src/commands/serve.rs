use folio_api_rest::shutdown_signal;
use folio_config::Config;
use folio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use folio_persistence_postgres::contact::PostgresContactRepository;
use tracing::info;

use crate::{database, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Ensuring the contacts table exists");
    let mut txn = database.begin_transaction().await?;
    PostgresContactRepository.ensure_schema(&mut txn).await?;
    txn.commit().await?;

    let server = environment::rest_server(&config, database)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server
        .serve(config.http.host, config.http.port, shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

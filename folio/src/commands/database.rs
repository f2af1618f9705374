use clap::Subcommand;
use folio_config::Config;
use folio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use folio_persistence_postgres::contact::PostgresContactRepository;

use crate::database;

#[derive(Debug, Subcommand)]
pub enum DatabaseCommand {
    /// Check that the database is reachable
    #[command(aliases(["p"]))]
    Ping,
    /// Create the contacts table unless it exists already
    #[command(aliases(["i"]))]
    Init,
}

impl DatabaseCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let db = database::connect(&config.database).await?;
        match self {
            Self::Ping => {
                db.ping().await?;
                println!("Database is reachable");
            }
            Self::Init => {
                let mut txn = db.begin_transaction().await?;
                PostgresContactRepository.ensure_schema(&mut txn).await?;
                txn.commit().await?;
                println!("Contacts table is ready");
            }
        }
        Ok(())
    }
}

use folio_models::{
    contact::{ContactMessage, ContactMessageAuthor},
    pagination::PaginationSlice,
};
use folio_persistence_postgres::{PostgresDatabase, PostgresDatabaseConfig};

pub type Db = PostgresDatabase;

/// Connect to the configured database and drop the contacts table.
pub async fn setup_clean() -> Db {
    let config = folio_config::load().unwrap();
    let database = config.database;

    let db = Db::connect(&PostgresDatabaseConfig {
        host: database.host,
        port: database.port,
        user: database.user,
        password: database.password,
        name: database.name,
        max_connections: database.max_connections,
        min_connections: database.min_connections,
        acquire_timeout: database.acquire_timeout.into(),
        idle_timeout: database.idle_timeout.map(Into::into),
        max_lifetime: database.max_lifetime.map(Into::into),
    })
    .await
    .unwrap();

    db.execute("drop table if exists contacts").await.unwrap();
    db
}

pub fn make_message(name: &str, email: &str, subject: &str, content: &str) -> ContactMessage {
    ContactMessage {
        author: ContactMessageAuthor {
            name: name.to_owned().try_into().unwrap(),
            email: email.parse().unwrap(),
        },
        subject: subject.to_owned().try_into().unwrap(),
        content: content.to_owned().try_into().unwrap(),
    }
}

pub fn make_slice(limit: u64, offset: u64) -> PaginationSlice {
    PaginationSlice {
        limit: limit.try_into().unwrap(),
        offset,
    }
}

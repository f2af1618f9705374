use anyhow::Context;
use bb8_postgres::tokio_postgres::{error::SqlState, Row};
use folio_models::{
    contact::{ContactMessage, ContactMessageAuthor, ContactMessageId, StoredContactMessage},
    pagination::PaginationSlice,
};
use folio_persistence_contracts::contact::ContactRepository;
use tracing::debug;

use crate::{columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresContactRepository;

columns!(contact as "c": "id", "name", "email", "subject", "message", "created_at");

const CREATE_CONTACTS_TABLE: &str = "create table if not exists contacts (
    id bigserial primary key,
    name varchar(100) not null,
    email varchar(100) not null,
    subject varchar(200) not null,
    message text not null,
    created_at timestamptz not null default now()
)";

impl ContactRepository<PostgresTransaction> for PostgresContactRepository {
    async fn ensure_schema(&self, txn: &mut PostgresTransaction) -> anyhow::Result<()> {
        match txn.txn().batch_execute(CREATE_CONTACTS_TABLE).await {
            Ok(()) => Ok(()),
            // Two concurrent `create table if not exists` can both pass the
            // existence check; the loser then trips over the catalog entry of
            // the winner. The table exists either way. The transaction is
            // aborted at this point, so committing it is a no-op.
            Err(err)
                if err.code().is_some_and(|code| {
                    *code == SqlState::UNIQUE_VIOLATION || *code == SqlState::DUPLICATE_TABLE
                }) =>
            {
                debug!("contacts table has been created concurrently");
                Ok(())
            }
            Err(err) => Err(err).context("Failed to create contacts table"),
        }
    }

    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        message: &ContactMessage,
    ) -> anyhow::Result<ContactMessageId> {
        txn.txn()
            .query_one(
                "insert into contacts (name, email, subject, message) values ($1, $2, $3, $4) \
                 returning id",
                &[
                    &*message.author.name,
                    &message.author.email.as_str(),
                    &*message.subject,
                    &*message.content,
                ],
            )
            .await
            .map(|row| row.get::<_, i64>(0).into())
            .context("Failed to insert contact message")
    }

    async fn get(
        &self,
        txn: &mut PostgresTransaction,
        id: ContactMessageId,
    ) -> anyhow::Result<Option<StoredContactMessage>> {
        txn.txn()
            .query_opt(
                &format!("select {CONTACT_COLS} from contacts c where c.id=$1"),
                &[&*id],
            )
            .await
            .map_err(Into::into)
            .and_then(|row| row.map(|row| decode_contact(&row, &mut 0)).transpose())
    }

    async fn list(
        &self,
        txn: &mut PostgresTransaction,
        PaginationSlice { limit, offset }: PaginationSlice,
    ) -> anyhow::Result<Vec<StoredContactMessage>> {
        let limit = i64::try_from(*limit)?;
        let offset = i64::try_from(offset)?;

        txn.txn()
            .query(
                &format!(
                    "select {CONTACT_COLS} from contacts c order by c.id desc limit $1 offset $2"
                ),
                &[&limit, &offset],
            )
            .await
            .map_err(Into::into)
            .and_then(|rows| {
                rows.into_iter()
                    .map(|row| decode_contact(&row, &mut 0))
                    .collect()
            })
    }

    async fn count(&self, txn: &mut PostgresTransaction) -> anyhow::Result<u64> {
        let count: i64 = txn
            .txn()
            .query_one("select count(*) from contacts", &[])
            .await?
            .get(0);
        Ok(count.try_into()?)
    }
}

fn decode_contact(row: &Row, offset: &mut usize) -> anyhow::Result<StoredContactMessage> {
    let mut idx = || {
        *offset += 1;
        *offset - 1
    };

    Ok(StoredContactMessage {
        id: row.get::<_, i64>(idx()).into(),
        message: ContactMessage {
            author: ContactMessageAuthor {
                name: row.get::<_, String>(idx()).try_into()?,
                email: row.get::<_, String>(idx()).parse()?,
            },
            subject: row.get::<_, String>(idx()).try_into()?,
            content: row.get::<_, String>(idx()).try_into()?,
        },
        created_at: row.get(idx()),
    })
}

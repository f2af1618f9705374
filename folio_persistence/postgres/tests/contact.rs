use chrono::{TimeDelta, Utc};
use common::{make_message, make_slice, setup_clean, Db};
use folio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use folio_persistence_postgres::contact::PostgresContactRepository;
use pretty_assertions::assert_eq;

mod common;

const REPO: PostgresContactRepository = PostgresContactRepository;

async fn setup() -> Db {
    let db = setup_clean().await;
    let mut txn = db.begin_transaction().await.unwrap();
    REPO.ensure_schema(&mut txn).await.unwrap();
    txn.commit().await.unwrap();
    db
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn ensure_schema_is_idempotent() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.ensure_schema(&mut txn).await.unwrap();
    txn.commit().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn ensure_schema_concurrently() {
    let db = setup_clean().await;

    let results = futures::future::join_all((0..8).map(|_| async {
        let mut txn = db.begin_transaction().await?;
        REPO.ensure_schema(&mut txn).await?;
        txn.commit().await
    }))
    .await;

    for result in results {
        result.unwrap();
    }

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn create_and_get() {
    let db = setup().await;
    let message = make_message(
        "Jane Doe",
        "jane@example.com",
        "Hello there",
        "I would like to get in touch.",
    );
    let start = Utc::now();

    let mut txn = db.begin_transaction().await.unwrap();
    let id = REPO.create(&mut txn, &message).await.unwrap();
    txn.commit().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.get(&mut txn, id).await.unwrap().unwrap();
    assert_eq!(result.id, id);
    assert_eq!(result.message, message);
    assert!(result.created_at >= start - TimeDelta::seconds(5));

    let result = REPO.get(&mut txn, (*id + 1).into()).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn create_keeps_whitespace() {
    let db = setup().await;
    let message = make_message(
        "  Jane  ",
        "jane@example.com",
        " Hello there ",
        "\tI would like to get in touch.\n",
    );

    let mut txn = db.begin_transaction().await.unwrap();
    let id = REPO.create(&mut txn, &message).await.unwrap();
    let result = REPO.get(&mut txn, id).await.unwrap().unwrap();
    assert_eq!(result.message, message);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn create_without_commit_is_discarded() {
    let db = setup().await;
    let message = make_message(
        "Jane Doe",
        "jane@example.com",
        "Hello there",
        "I would like to get in touch.",
    );

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &message).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn ids_are_increasing() {
    let db = setup().await;
    let message = make_message(
        "Jane Doe",
        "jane@example.com",
        "Hello there",
        "I would like to get in touch.",
    );

    let mut txn = db.begin_transaction().await.unwrap();
    let first = REPO.create(&mut txn, &message).await.unwrap();
    let second = REPO.create(&mut txn, &message).await.unwrap();
    txn.commit().await.unwrap();

    assert!(second > first);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn list_and_count() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let mut ids = Vec::new();
    for i in 0..5 {
        let message = make_message(
            &format!("Author {i}"),
            &format!("author{i}@example.com"),
            &format!("Subject {i}"),
            &format!("Message number {i}"),
        );
        ids.push(REPO.create(&mut txn, &message).await.unwrap());
    }
    txn.commit().await.unwrap();
    ids.reverse();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 5);

    for (limit, offset) in [(1, 0), (2, 1), (5, 0), (10, 3), (3, 7)] {
        let result = REPO
            .list(&mut txn, make_slice(limit, offset))
            .await
            .unwrap()
            .into_iter()
            .map(|contact| contact.id)
            .collect::<Vec<_>>();

        let offset = (offset as usize).min(ids.len());
        let end = (offset + limit as usize).min(ids.len());
        assert_eq!(result, &ids[offset..end]);
    }
}

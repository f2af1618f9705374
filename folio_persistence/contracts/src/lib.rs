use std::future::Future;

pub mod contact;

#[cfg_attr(feature = "mock", mockall::automock(type Transaction = MockTransaction;))]
pub trait Database: Send + Sync + 'static {
    type Transaction: Transaction;

    /// Starts a new transaction which can be used to interact with the
    /// database.
    ///
    /// Changes are persisted only after explicitly invoking
    /// [`Transaction::commit()`].
    fn begin_transaction(&self) -> impl Future<Output = anyhow::Result<Self::Transaction>> + Send;

    /// Verify the connection to the database.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Transaction: Send + Sync + 'static {
    /// Persists any changes made to the database using this transaction.
    fn commit(self) -> impl Future<Output = anyhow::Result<()>> + Send;
    /// Explicitly discards any changes made to the database using this
    /// transaction.
    fn rollback(self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockTransaction {
    pub fn build(expect_commit: bool) -> Self {
        let mut txn = Self::new();
        if expect_commit {
            txn.expect_commit()
                .once()
                .return_once(|| Box::pin(std::future::ready(Ok(()))));
        }
        txn
    }
}

#[cfg(feature = "mock")]
impl MockDatabase {
    pub fn build(expect_commit: bool) -> Self {
        Self::build_many([expect_commit])
    }

    /// Expect one `begin_transaction` call per entry, in order. Each entry
    /// states whether that transaction is expected to be committed.
    pub fn build_many(expect_commits: impl IntoIterator<Item = bool>) -> Self {
        let mut txns = expect_commits
            .into_iter()
            .map(MockTransaction::build)
            .collect::<Vec<_>>()
            .into_iter();

        let mut db = Self::new();
        db.expect_begin_transaction()
            .times(txns.len())
            .returning(move || {
                let txn = txns.next().expect("more transactions than expected");
                Box::pin(std::future::ready(Ok(txn)))
            });
        db
    }

    pub fn with_begin_transaction_error(mut self, message: &'static str) -> Self {
        self.expect_begin_transaction()
            .once()
            .return_once(move || Box::pin(std::future::ready(Err(anyhow::anyhow!(message)))));
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if result {
                Ok(())
            } else {
                Err(anyhow::anyhow!("database unreachable"))
            }))
        });
        self
    }
}

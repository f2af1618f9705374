use std::future::Future;

use folio_models::{
    contact::{ContactMessage, ContactMessageId, StoredContactMessage},
    pagination::PaginationSlice,
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Create the storage structure for contact messages unless it already
    /// exists.
    ///
    /// Safe to call any number of times, including concurrently.
    fn ensure_schema(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Persist a new contact message and return its generated id.
    fn create(
        &self,
        txn: &mut Txn,
        message: &ContactMessage,
    ) -> impl Future<Output = anyhow::Result<ContactMessageId>> + Send;

    /// Return the contact message with the given id.
    fn get(
        &self,
        txn: &mut Txn,
        id: ContactMessageId,
    ) -> impl Future<Output = anyhow::Result<Option<StoredContactMessage>>> + Send;

    /// Return a slice of all contact messages, newest first.
    fn list(
        &self,
        txn: &mut Txn,
        slice: PaginationSlice,
    ) -> impl Future<Output = anyhow::Result<Vec<StoredContactMessage>>> + Send;

    /// Return the total number of contact messages.
    fn count(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<u64>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactRepository<Txn> {
    pub fn with_ensure_schema(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ensure_schema()
            .once()
            .with(mockall::predicate::always())
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_create(
        mut self,
        message: ContactMessage,
        result: anyhow::Result<ContactMessageId>,
    ) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(message),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get(mut self, id: ContactMessageId, result: Option<StoredContactMessage>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(id))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(mut self, slice: PaginationSlice, result: Vec<StoredContactMessage>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(slice))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_count(mut self, result: u64) -> Self {
        self.expect_count()
            .once()
            .with(mockall::predicate::always())
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}

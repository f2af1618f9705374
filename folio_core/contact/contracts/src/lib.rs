use std::future::Future;

use folio_models::contact::{ContactForm, SubmissionOutcome};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a submitted contact form and persist it.
    ///
    /// Never fails: invalid input and storage failures are both reported
    /// through the returned [`SubmissionOutcome`].
    fn submit(&self, form: ContactForm) -> impl Future<Output = SubmissionOutcome> + Send;
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(mut self, form: ContactForm, result: SubmissionOutcome) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}

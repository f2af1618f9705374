use folio_core_contact_contracts::ContactFeatureService;
use folio_models::contact::{
    ContactForm, ContactMessage, ContactMessageId, FieldErrors, SubmissionOutcome,
    SUBMISSION_FAILED_MESSAGE,
};
use folio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Db, ContactRepo> {
    db: Db,
    contact_repo: ContactRepo,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureConfig {
    /// Report the raw storage error text to the submitter instead of the
    /// generic failure message.
    pub expose_storage_errors: bool,
}

impl<Db, ContactRepo> ContactFeatureServiceImpl<Db, ContactRepo> {
    pub fn new(db: Db, contact_repo: ContactRepo, config: ContactFeatureConfig) -> Self {
        Self {
            db,
            contact_repo,
            config,
        }
    }
}

impl<Db, ContactRepo> ContactFeatureService for ContactFeatureServiceImpl<Db, ContactRepo>
where
    Db: Database,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    #[tracing::instrument(skip_all)]
    async fn submit(&self, form: ContactForm) -> SubmissionOutcome {
        let message = match form.validate() {
            Ok(message) => message,
            Err(errors) => {
                debug!(?errors, "Rejected invalid contact form");
                return SubmissionOutcome::Rejected { errors };
            }
        };

        match self.store(&message).await {
            Ok(contact_id) => {
                info!(%contact_id, "Stored contact message");
                SubmissionOutcome::Success { contact_id }
            }
            Err(err) => {
                error!("Failed to store contact message: {err:#}");
                let general = if self.config.expose_storage_errors {
                    format!("{err:#}")
                } else {
                    SUBMISSION_FAILED_MESSAGE.into()
                };
                SubmissionOutcome::Failed {
                    errors: FieldErrors::general(general),
                }
            }
        }
    }
}

impl<Db, ContactRepo> ContactFeatureServiceImpl<Db, ContactRepo>
where
    Db: Database,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    async fn store(&self, message: &ContactMessage) -> anyhow::Result<ContactMessageId> {
        let mut txn = self.db.begin_transaction().await?;
        self.contact_repo.ensure_schema(&mut txn).await?;
        txn.commit().await?;

        let mut txn = self.db.begin_transaction().await?;
        let contact_id = self.contact_repo.create(&mut txn, message).await?;
        txn.commit().await?;

        Ok(contact_id)
    }
}

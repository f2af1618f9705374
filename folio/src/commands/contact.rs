use std::net::SocketAddr;

use anyhow::{bail, ensure, Context};
use clap::{Args, Subcommand};
use folio_config::Config;
use folio_models::{
    contact::{ContactForm, ContactMessageId, FieldErrors, StoredContactMessage},
    pagination::{PaginationLimit, PaginationSlice},
};
use folio_persistence_contracts::{contact::ContactRepository, Database};
use folio_persistence_postgres::contact::PostgresContactRepository;
use reqwest::Url;

use crate::{client::ContactClient, database};

pub const PREFLIGHT_FAILED_MESSAGE: &str = "Please correct the errors in the form.";

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Validate a contact form locally without sending it
    #[command(aliases(["c"]))]
    Check {
        #[command(flatten)]
        form: ContactFormArgs,
    },
    /// Validate a contact form and submit it to a running server
    #[command(aliases(["s"]))]
    Send {
        /// URL of the contact endpoint [default: derived from the http config]
        #[arg(long)]
        url: Option<Url>,
        #[command(flatten)]
        form: ContactFormArgs,
    },
    /// List stored contact messages, newest first
    #[command(aliases(["ls", "l"]))]
    List {
        /// Maximum number of messages to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: u64,
        /// Number of messages to skip
        #[arg(long, default_value = "0")]
        offset: u64,
    },
    /// Show a single stored contact message
    Show { id: i64 },
}

#[derive(Debug, Args)]
pub struct ContactFormArgs {
    /// Name of the sender
    #[arg(long)]
    name: Option<String>,
    /// Email address of the sender
    #[arg(long)]
    email: Option<String>,
    /// Subject of the message
    #[arg(long)]
    subject: Option<String>,
    /// Content of the message
    #[arg(long)]
    message: Option<String>,
}

impl From<ContactFormArgs> for ContactForm {
    fn from(value: ContactFormArgs) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Check { form } => check(form.into()),
            Self::Send { url, form } => send(config, url, form.into()).await,
            Self::List { limit, offset } => list(config, limit, offset).await,
            Self::Show { id } => show(config, id.into()).await,
        }
    }
}

fn check(form: ContactForm) -> anyhow::Result<()> {
    preflight(&form)?;
    println!("The contact form is valid");
    Ok(())
}

async fn send(config: Config, url: Option<Url>, form: ContactForm) -> anyhow::Result<()> {
    preflight(&form)?;

    let url = match url {
        Some(url) => url,
        None => contact_url(SocketAddr::from((config.http.host, config.http.port)))?,
    };
    let client = ContactClient::new(url)?;
    let response = client.submit(&form).await?;

    println!("{}", response.message);
    if let Some(contact_id) = response.contact_id {
        println!("Contact message id: {contact_id}");
    }
    if let Some(errors) = &response.errors {
        print_errors(errors);
    }

    ensure!(response.success, "The server did not accept the message");
    Ok(())
}

async fn list(config: Config, limit: u64, offset: u64) -> anyhow::Result<()> {
    let limit = PaginationLimit::try_new(limit)
        .with_context(|| format!("Limit must be between 1 and {}", PaginationLimit::MAX))?;

    let db = database::connect(&config.database).await?;
    let (total, contacts) =
        fetch_page(&db, &PostgresContactRepository, PaginationSlice { limit, offset }).await?;

    for contact in &contacts {
        println!("{}", summary(contact));
    }
    println!("Showing {} of {total} contact messages", contacts.len());

    Ok(())
}

async fn show(config: Config, id: ContactMessageId) -> anyhow::Result<()> {
    let db = database::connect(&config.database).await?;
    let contact = fetch_one(&db, &PostgresContactRepository, id).await?;

    println!("{}", summary(&contact));
    println!();
    println!("{}", *contact.message.content);

    Ok(())
}

async fn fetch_page<Db, ContactRepo>(
    db: &Db,
    contact_repo: &ContactRepo,
    slice: PaginationSlice,
) -> anyhow::Result<(u64, Vec<StoredContactMessage>)>
where
    Db: Database,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    let mut txn = db.begin_transaction().await?;

    let total = contact_repo.count(&mut txn).await?;
    let contacts = contact_repo.list(&mut txn, slice).await?;

    Ok((total, contacts))
}

async fn fetch_one<Db, ContactRepo>(
    db: &Db,
    contact_repo: &ContactRepo,
    id: ContactMessageId,
) -> anyhow::Result<StoredContactMessage>
where
    Db: Database,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    let mut txn = db.begin_transaction().await?;

    match contact_repo.get(&mut txn, id).await? {
        Some(contact) => Ok(contact),
        None => bail!("Contact message {id} does not exist"),
    }
}

/// Run the shared validation before anything leaves this process.
fn preflight(form: &ContactForm) -> anyhow::Result<()> {
    if let Err(errors) = form.validate() {
        print_errors(&errors);
        bail!(PREFLIGHT_FAILED_MESSAGE);
    }
    Ok(())
}

fn contact_url(addr: SocketAddr) -> anyhow::Result<Url> {
    let url = format!("http://{addr}/contact");
    url.parse()
        .with_context(|| format!("Failed to build contact endpoint url from {url:?}"))
}

fn print_errors(errors: &FieldErrors) {
    for (field, messages) in errors.iter() {
        for message in messages {
            eprintln!("{field}: {message}");
        }
    }
}

fn summary(contact: &StoredContactMessage) -> String {
    let StoredContactMessage {
        id,
        message,
        created_at,
    } = contact;

    format!(
        "#{id} [{created_at}] {} <{}>: {}",
        *message.author.name, message.author.email, *message.subject
    )
}

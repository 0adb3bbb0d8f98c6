//! SMTP email dispatch.
//!
//! All notifications are best-effort: callers are expected to
//! capture the returned [`Error`] and log it instead of failing
//! the request that triggered the message.

use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox},
    transport::smtp::{self, authentication::Credentials},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config;

/// Errors that may occur while composing or relaying a message.
#[derive(Debug)]
pub enum Error {
    /// Invalid sender or recipient address.
    Address(AddressError),

    /// Message composition error.
    Message(lettre::error::Error),

    /// SMTP relay error.
    Transport(smtp::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Address(err) => err.fmt(f),
            Error::Message(err) => err.fmt(f),
            Error::Transport(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<AddressError> for Error {
    fn from(err: AddressError) -> Self {
        Error::Address(err)
    }
}

impl From<lettre::error::Error> for Error {
    fn from(err: lettre::error::Error) -> Self {
        Error::Message(err)
    }
}

impl From<smtp::Error> for Error {
    fn from(err: smtp::Error) -> Self {
        Error::Transport(err)
    }
}

/// Configured SMTP mailer.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Create new [`Mailer`] from the provided [`Smtp`] configuration.
    ///
    /// [`Smtp`]: config::Smtp
    pub fn new(config: &config::Smtp) -> Result<Self, Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Mailer {
            transport,
            from: config.from_address.parse()?,
        })
    }

    /// Relay a single HTML message to the provided recipient.
    pub async fn send(&self, recipient: &str, subject: &str, body: String) -> Result<(), Error> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(format!("<html><body><h2>{subject}</h2><p>{body}</p></body></html>"))?;

        self.transport.send(message).await?;

        Ok(())
    }
}

//! Nickname delivery via carrier SMS email gateways.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport to send each batch
//! as a plain-text email; the carrier forwards it to the phone as an SMS.

use lettre::{
  message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
  AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::SmtpConfig;

/// Error type for delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
  /// SMTP transport-level failure (authentication, connection, etc.).
  #[error("SMTP transport error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),

  /// The recipient or sender address could not be parsed.
  #[error("Email address parse error: {0}")]
  Address(#[from] lettre::address::AddressError),

  /// The MIME message could not be assembled.
  #[error("Email build error: {0}")]
  Build(String),
}

/// Anything that can deliver a text body to an address.
#[allow(async_fn_in_trait)]
pub trait Notifier {
  async fn send(&self, address: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Sends batches over SMTP with STARTTLS.
pub struct SmtpNotifier {
  config: SmtpConfig,
  password: String,
}

impl SmtpNotifier {
  pub fn new(config: SmtpConfig, password: String) -> Self {
    Self { config, password }
  }

  fn message(&self, address: &str, body: &str) -> Result<Message, DeliveryError> {
    Message::builder()
      .from(self.config.from.parse()?)
      .to(address.parse()?)
      .header(ContentType::TEXT_PLAIN)
      .body(body.to_string())
      .map_err(|e| DeliveryError::Build(e.to_string()))
  }
}

impl Notifier for SmtpNotifier {
  async fn send(&self, address: &str, body: &str) -> Result<(), DeliveryError> {
    let email = self.message(address, body)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
      .port(self.config.port)
      .credentials(Credentials::new(
        self.config.username().to_string(),
        self.password.clone(),
      ))
      .build();
    mailer.send(email).await?;

    info!(to = address, "batch delivered");
    Ok(())
  }
}

/// Prints batches to stdout instead of sending them.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
  async fn send(&self, address: &str, body: &str) -> Result<(), DeliveryError> {
    println!("--- to {} ---\n{}\n", address, body);
    Ok(())
  }
}

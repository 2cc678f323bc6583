//! Email notifications for ledger changes.
//!
//! One fixed recipient, two fixed templates: a full field listing when an
//! entry is created, and an operation summary when the admin rewrites the
//! store. Delivery runs over SMTP with implicit TLS. Callers treat a failed
//! send as a warning, never as a command failure.

use crate::{config::settings::EmailSettings, entities::LedgerEntry, errors::Result};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox,
    transport::smtp::authentication::Credentials,
};

/// Subject used for the entry-created template.
const SUBJECT_ENTRY_ADDED: &str = "New video entry added";
/// Subject used for the admin-update template.
const SUBJECT_LEDGER_UPDATED: &str = "Video ledger updated";

/// Sends the fixed notification templates over SMTP.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Builds a notifier from the `[email]` settings and the SMTP password.
    ///
    /// # Errors
    /// Returns an error when an address does not parse or the relay host is
    /// not usable.
    pub fn from_settings(settings: &EmailSettings, password: String) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)?
            .port(settings.smtp_port)
            .credentials(Credentials::new(settings.username.clone(), password))
            .build();

        Ok(Self {
            transport,
            from: settings.from.parse()?,
            to: settings.to.parse()?,
        })
    }

    /// Notifies about a freshly recorded entry.
    ///
    /// # Errors
    /// Returns an error when the message cannot be built or sent.
    pub async fn entry_added(&self, entry: &LedgerEntry) -> Result<()> {
        self.send(SUBJECT_ENTRY_ADDED, entry_added_body(entry)).await
    }

    /// Notifies about an admin operation that rewrote the store.
    ///
    /// # Errors
    /// Returns an error when the message cannot be built or sent.
    pub async fn ledger_updated(&self, action: &str, affected: usize) -> Result<()> {
        self.send(SUBJECT_LEDGER_UPDATED, ledger_updated_body(action, affected))
            .await
    }

    async fn send(&self, subject: &str, body: String) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// The entry-created body: every field of the new entry, one per line.
fn entry_added_body(entry: &LedgerEntry) -> String {
    let video = if entry.video_name.is_empty() {
        "-"
    } else {
        entry.video_name.as_str()
    };

    format!(
        "A new video entry was added:\n\
         Date: {}\n\
         Client: {}\n\
         Video: {video}\n\
         Length (min): {}\n\
         Amount: {} {}\n\
         Paid: {}\n\
         Initial date: {}\n\
         Deadline: {}\n",
        entry.date,
        entry.client,
        entry.length_min,
        entry.amount,
        entry.currency,
        entry.paid,
        entry.initial_date,
        entry.deadline,
    )
}

/// The admin-update body: what ran and how many rows it touched.
fn ledger_updated_body(action: &str, affected: usize) -> String {
    format!(
        "The video ledger was updated:\n\
         Operation: {action}\n\
         Rows affected: {affected}\n"
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn settings() -> EmailSettings {
        EmailSettings {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            username: "books@example.com".to_string(),
            from: "books@example.com".to_string(),
            to: "owner@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_from_settings_builds() {
        assert!(EmailNotifier::from_settings(&settings(), "secret".to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_from_settings_rejects_bad_address() {
        let bad = EmailSettings {
            to: "not-an-address".to_string(),
            ..settings()
        };
        assert!(EmailNotifier::from_settings(&bad, "secret".to_string()).is_err());
    }

    #[test]
    fn test_entry_added_body_lists_fields() {
        let entry = pkr_entry(2026, 7, 14, 1500.0);
        let body = entry_added_body(&entry);

        assert!(body.starts_with("A new video entry was added:"));
        assert!(body.contains("Date: 2026-07-14"));
        assert!(body.contains("Client: Test Client"));
        assert!(body.contains("Video: Test video"));
        assert!(body.contains("Length (min): 5"));
        assert!(body.contains("Amount: 1500 PKR"));
        assert!(body.contains("Paid: false"));
        assert!(body.contains("Deadline: 2026-07-14"));
    }

    #[test]
    fn test_entry_added_body_flat_payment_shows_dash() {
        let entry = usd_entry(2026, 7, 14, 80.0);
        let body = entry_added_body(&entry);
        assert!(body.contains("Video: -"));
        assert!(body.contains("Amount: 80 USD"));
    }

    #[test]
    fn test_ledger_updated_body() {
        let body = ledger_updated_body("delete row 3", 1);
        assert!(body.contains("Operation: delete row 3"));
        assert!(body.contains("Rows affected: 1"));
    }
}

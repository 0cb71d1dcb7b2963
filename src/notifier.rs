//! Best-effort email to the site administrator about new reviews.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, info};

use crate::config::MailSettings;
use crate::error::NotificationError;
use crate::models::review::Review;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, review: &Review) -> Result<(), NotificationError>;
}

/// Used when mail credentials are not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, review: &Review) -> Result<(), NotificationError> {
        debug!("[NOTIFY] Notifications disabled, skipping {}", review);
        Ok(())
    }
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(mail: &MailSettings) -> Result<Self, NotificationError> {
        let credentials = Credentials::new(mail.username.clone(), mail.password.clone());
        let builder = if mail.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&mail.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&mail.server)
        };
        let transport = builder
            .port(mail.port)
            .credentials(credentials)
            .timeout(Some(mail.timeout))
            .build();

        Ok(SmtpNotifier {
            transport,
            from: mail.username.parse()?,
            to: mail.admin_email.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, review: &Review) -> Result<(), NotificationError> {
        let (subject, body) = compose(review);
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;
        self.transport.send(email).await?;
        info!("[NOTIFY] Sent admin notification for {}", review);
        Ok(())
    }
}

/// Subject and plain-text body of the admin email.
pub fn compose(review: &Review) -> (String, String) {
    let subject = format!("New review from {} ({}/5)", review.name, review.rating);
    let body = format!(
        "A new review was submitted.\n\nName: {}\nRating: {} ({}/5)\nSubmitted: {}\n\nComment:\n{}\n",
        review.name,
        review.rating.stars(),
        review.rating,
        review.date.format("%Y-%m-%d %H:%M:%S UTC"),
        review.comment,
    );
    (subject, body)
}

pub fn from_settings(mail: Option<&MailSettings>) -> Result<Arc<dyn Notifier>, NotificationError> {
    match mail {
        Some(mail) => {
            info!(
                "[NOTIFY] Admin notifications go to {} via {}:{}",
                mail.admin_email, mail.server, mail.port
            );
            Ok(Arc::new(SmtpNotifier::new(mail)?))
        }
        None => Ok(Arc::new(NoopNotifier)),
    }
}

/// Runs the notifier, giving up after `timeout`.
pub async fn dispatch(
    notifier: &dyn Notifier,
    review: &Review,
    timeout: Duration,
) -> Result<(), NotificationError> {
    match tokio::time::timeout(timeout, notifier.notify(review)).await {
        Ok(result) => result,
        Err(_) => Err(NotificationError::TimedOut(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::Rating;
    use chrono::{TimeZone, Utc};

    fn review() -> Review {
        Review {
            id: 1,
            name: "Al".into(),
            rating: Rating::new(4).unwrap(),
            comment: "Great service overall!".into(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    struct Stalling;

    #[async_trait]
    impl Notifier for Stalling {
        async fn notify(&self, _review: &Review) -> Result<(), NotificationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[test]
    fn compose_summarizes_the_review() {
        let (subject, body) = compose(&review());
        assert_eq!(subject, "New review from Al (4/5)");
        assert!(body.contains("Name: Al"));
        assert!(body.contains("Rating: ★★★★☆ (4/5)"));
        assert!(body.contains("Submitted: 2024-05-01 12:30:00 UTC"));
        assert!(body.ends_with("Great service overall!\n"));
    }

    #[tokio::test]
    async fn noop_notifier_succeeds() {
        assert!(dispatch(&NoopNotifier, &review(), Duration::from_secs(1))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn dispatch_times_out_slow_notifiers() {
        let result = dispatch(&Stalling, &review(), Duration::from_millis(20)).await;
        assert!(matches!(result, Err(NotificationError::TimedOut(t)) if t == Duration::from_millis(20)));
    }

    #[test]
    fn smtp_notifier_rejects_bad_addresses() {
        let mail = MailSettings {
            server: "localhost".into(),
            port: 2525,
            use_tls: false,
            username: "not an address".into(),
            password: "pw".into(),
            admin_email: "owner@example.com".into(),
            timeout: Duration::from_secs(1),
        };
        assert!(matches!(
            SmtpNotifier::new(&mail),
            Err(NotificationError::Address(_))
        ));
    }

    #[test]
    fn missing_settings_give_a_noop_notifier() {
        assert!(from_settings(None).is_ok());
    }
}

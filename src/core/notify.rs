//! Operator notification for a new signup.
//!
//! The widget has no backend, so a signup is announced by handing a composed
//! `mailto:` link to the platform's URI handler. Delivery is best-effort and
//! unobservable: nothing reports whether a mail client opened or whether the
//! visitor sent the message.

use crate::config::WidgetConfig;
use crate::email::SignupEmail;

/// Invokes an external URI handler without navigating the current page.
/// Fire-and-forget: there is no completion signal.
pub trait DeepLinkLauncher {
    fn launch(&mut self, uri: &str);
}

/// Source of the human-readable local timestamp stamped on notifications.
pub trait Clock {
    fn local_timestamp(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupNotification {
    pub operator: String,
    pub subject: String,
    pub email: SignupEmail,
    pub timestamp: String,
}

impl SignupNotification {
    pub fn new(
        operator: impl Into<String>,
        subject: impl Into<String>,
        email: SignupEmail,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator.into(),
            subject: subject.into(),
            email,
            timestamp: timestamp.into(),
        }
    }

    pub fn from_config(cfg: &WidgetConfig, email: SignupEmail, clock: &dyn Clock) -> Self {
        Self::new(
            cfg.notification_email.as_str(),
            cfg.notification_subject.as_str(),
            email,
            clock.local_timestamp(),
        )
    }

    pub fn body(&self) -> String {
        format!(
            "New waitlist signup:\n\nEmail: {}\n\nDate: {}",
            self.email, self.timestamp
        )
    }

    /// `mailto:` deep link with percent-encoded subject and body.
    pub fn mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.operator,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body())
        )
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTIFICATION_EMAIL: &str = "dmvanmeenen@gmail.com";
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "New HyperWave Waitlist Signup";
pub const DEFAULT_PAGE_VIEW_ENDPOINT: &str = "https://api.counterapi.dev/v1/hyperwave/landing/up";

/// Delay before the transient link frame is detached. Long enough for the
/// navigation to be dispatched in current browsers; not measured against real
/// mail-client launch latency.
pub const DEFAULT_LINK_CLEANUP_MS: u32 = 100;

/// Widget settings. Every field has a default so a page may override only the
/// parts it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub notification_email: String,
    pub notification_subject: String,
    pub page_view_endpoint: String,
    pub link_cleanup_ms: u32,
    /// Fixed digit separator for the view count. Unset means the host's
    /// locale decides.
    pub thousands_separator: Option<String>,
    pub active_class: String,
    pub error_class: String,
    pub elements: ElementIds,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            notification_email: DEFAULT_NOTIFICATION_EMAIL.to_string(),
            notification_subject: DEFAULT_NOTIFICATION_SUBJECT.to_string(),
            page_view_endpoint: DEFAULT_PAGE_VIEW_ENDPOINT.to_string(),
            link_cleanup_ms: DEFAULT_LINK_CLEANUP_MS,
            thousands_separator: None,
            active_class: "active".to_string(),
            error_class: "error".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Ids of the page elements the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub trigger: String,
    pub dialog: String,
    pub form: String,
    pub form_view: String,
    pub success_view: String,
    pub email_input: String,
    pub email_error: String,
    pub close_button: String,
    pub cancel_button: String,
    pub close_success_button: String,
    pub view_count: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            trigger: "waitlistButton".to_string(),
            dialog: "waitlistModal".to_string(),
            form: "waitlistForm".to_string(),
            form_view: "formContent".to_string(),
            success_view: "successContent".to_string(),
            email_input: "email".to_string(),
            email_error: "emailError".to_string(),
            close_button: "closeButton".to_string(),
            cancel_button: "cancelButton".to_string(),
            close_success_button: "closeSuccessButton".to_string(),
            view_count: "pageViewCount".to_string(),
        }
    }
}

impl ElementIds {
    /// Ids of every control that raises the cancel event.
    pub fn cancel_controls(&self) -> [&str; 3] {
        [
            self.close_button.as_str(),
            self.cancel_button.as_str(),
            self.close_success_button.as_str(),
        ]
    }
}

//! Host-independent core of the HyperWave landing-page widget: the waitlist
//! dialog state machine, the signup notification link, and the page-view
//! counter readout. The browser binding lives in `crates/hyperwave_web`.

#[path = "core/config.rs"]
pub mod config;

#[path = "core/counter.rs"]
pub mod counter;

#[path = "core/email.rs"]
pub mod email;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/modal.rs"]
pub mod modal;

#[path = "core/notify.rs"]
pub mod notify;

pub use config::{ElementIds, WidgetConfig};
pub use counter::{CountFormatter, DisplayRegion, Grouping, ViewCount, ViewCountSource};
pub use email::SignupEmail;
pub use error::{FetchError, ValidationError};
pub use modal::{
    ClickTarget, ModalController, ModalEvent, ModalState, ModalView, Region, SubmitOutcome,
};
pub use notify::{Clock, DeepLinkLauncher, SignupNotification};

//! Waitlist dialog state machine.
//!
//! The controller owns the dialog's visibility/focus state and nothing else.
//! All rendering goes through [`ModalView`], so the same transitions drive the
//! live document in the browser and the recording fakes in tests.

use tracing::debug;

use crate::config::WidgetConfig;
use crate::email::SignupEmail;
use crate::error::ValidationError;
use crate::notify::{Clock, DeepLinkLauncher, SignupNotification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    OpenForm,
    OpenSuccess,
}

impl ModalState {
    pub fn is_open(self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn label(self) -> &'static str {
        match self {
            ModalState::Closed => "closed",
            ModalState::OpenForm => "open/form",
            ModalState::OpenSuccess => "open/success",
        }
    }
}

/// The two mutually exclusive content regions inside the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Form,
    Success,
}

/// Where a click on the dialog landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dialog's outer surface (the backdrop).
    Surface,
    /// Any element inside the dialog body.
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent<T> {
    Open(T),
    Cancel,
    Submit,
    BackdropClick(ClickTarget),
    KeyDown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The field failed validation; the form stays up with its error markers.
    Rejected(ValidationError),
    /// The notification link was launched and the success view is showing.
    Sent(SignupNotification),
    /// Submit arrived while the form was not showing.
    Ignored,
}

/// Rendering surface the controller drives.
pub trait ModalView {
    /// Handle to the control that opened the dialog. Only held while open.
    type Trigger;

    fn set_dialog_visible(&mut self, visible: bool);
    fn set_region_visible(&mut self, region: Region, visible: bool);
    /// Shows or hides both the field's error styling and the error indicator.
    fn set_email_error(&mut self, shown: bool);
    fn email_value(&self) -> String;
    /// Platform validity of the email field (type + required constraints).
    fn email_is_valid(&self) -> bool;
    fn clear_email(&mut self);
    fn focus_email(&mut self);
    fn focus_trigger(&mut self, trigger: &Self::Trigger);
}

pub struct ModalController<V: ModalView, L, C> {
    view: V,
    launcher: L,
    clock: C,
    cfg: WidgetConfig,
    state: ModalState,
    trigger: Option<V::Trigger>,
}

impl<V, L, C> ModalController<V, L, C>
where
    V: ModalView,
    L: DeepLinkLauncher,
    C: Clock,
{
    pub fn new(view: V, launcher: L, clock: C, cfg: &WidgetConfig) -> Self {
        Self {
            view,
            launcher,
            clock,
            cfg: cfg.clone(),
            state: ModalState::Closed,
            trigger: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn trigger(&self) -> Option<&V::Trigger> {
        self.trigger.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn handle(&mut self, event: ModalEvent<V::Trigger>) -> Option<SubmitOutcome> {
        match event {
            ModalEvent::Open(trigger) => self.open(trigger),
            ModalEvent::Cancel => self.cancel(),
            ModalEvent::Submit => return Some(self.submit()),
            ModalEvent::BackdropClick(target) => self.backdrop_click(target),
            ModalEvent::KeyDown(key) => self.key_down(&key),
        }
        None
    }

    pub fn open(&mut self, trigger: V::Trigger) {
        if self.state.is_open() {
            debug!(state = self.state.label(), "open ignored: dialog already open");
            return;
        }
        self.trigger = Some(trigger);
        self.view.set_region_visible(Region::Form, true);
        self.view.set_region_visible(Region::Success, false);
        self.view.set_dialog_visible(true);
        self.view.focus_email();
        self.transition(ModalState::OpenForm);
    }

    pub fn cancel(&mut self) {
        if !self.state.is_open() {
            return;
        }
        self.view.set_dialog_visible(false);
        self.view.set_region_visible(Region::Form, true);
        self.view.set_region_visible(Region::Success, false);
        self.view.clear_email();
        self.view.set_email_error(false);
        if let Some(trigger) = self.trigger.take() {
            self.view.focus_trigger(&trigger);
        }
        self.transition(ModalState::Closed);
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.state != ModalState::OpenForm {
            debug!(state = self.state.label(), "submit ignored");
            return SubmitOutcome::Ignored;
        }

        // Both the platform's field check and the address grammar must pass.
        let checked = SignupEmail::parse(&self.view.email_value()).and_then(|email| {
            if self.view.email_is_valid() {
                Ok(email)
            } else {
                Err(ValidationError::Malformed(email.to_string()))
            }
        });
        let email = match checked {
            Ok(email) => email,
            Err(reason) => {
                self.view.set_email_error(true);
                debug!("signup rejected: email field invalid");
                return SubmitOutcome::Rejected(reason);
            }
        };
        self.view.set_email_error(false);

        let notification = SignupNotification::from_config(&self.cfg, email, &self.clock);
        self.launcher.launch(&notification.mailto_uri());
        debug!(operator = %notification.operator, "signup notification launched");

        self.view.set_region_visible(Region::Form, false);
        self.view.set_region_visible(Region::Success, true);
        self.transition(ModalState::OpenSuccess);
        SubmitOutcome::Sent(notification)
    }

    pub fn backdrop_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Surface {
            self.cancel();
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if key == "Escape" && self.state.is_open() {
            self.cancel();
        }
    }

    fn transition(&mut self, next: ModalState) {
        debug!(from = self.state.label(), to = next.label(), "waitlist dialog");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::is_valid_email;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Focus {
        Email,
        Trigger(u32),
    }

    #[derive(Default)]
    struct FakeView {
        dialog_visible: bool,
        form_visible: bool,
        success_visible: bool,
        error_shown: bool,
        email: String,
        focus: Option<Focus>,
        trigger_focus_count: u32,
        /// Simulates a native check stricter than the grammar.
        platform_veto: bool,
    }

    impl ModalView for FakeView {
        type Trigger = u32;

        fn set_dialog_visible(&mut self, visible: bool) {
            self.dialog_visible = visible;
        }

        fn set_region_visible(&mut self, region: Region, visible: bool) {
            match region {
                Region::Form => self.form_visible = visible,
                Region::Success => self.success_visible = visible,
            }
        }

        fn set_email_error(&mut self, shown: bool) {
            self.error_shown = shown;
        }

        fn email_value(&self) -> String {
            self.email.clone()
        }

        fn email_is_valid(&self) -> bool {
            !self.platform_veto && is_valid_email(self.email.trim())
        }

        fn clear_email(&mut self) {
            self.email.clear();
        }

        fn focus_email(&mut self) {
            self.focus = Some(Focus::Email);
        }

        fn focus_trigger(&mut self, trigger: &u32) {
            self.focus = Some(Focus::Trigger(*trigger));
            self.trigger_focus_count += 1;
        }
    }

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Vec<String>,
    }

    impl DeepLinkLauncher for RecordingLauncher {
        fn launch(&mut self, uri: &str) {
            self.launched.push(uri.to_string());
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn local_timestamp(&self) -> String {
            "10/19/2026, 9:30:00 AM".to_string()
        }
    }

    type Controller = ModalController<FakeView, RecordingLauncher, FixedClock>;

    fn controller() -> Controller {
        ModalController::new(
            FakeView::default(),
            RecordingLauncher::default(),
            FixedClock,
            &WidgetConfig::default(),
        )
    }

    fn type_email(c: &mut Controller, value: &str) {
        c.view.email = value.to_string();
    }

    #[test]
    fn starts_closed() {
        let c = controller();
        assert_eq!(c.state(), ModalState::Closed);
        assert!(c.trigger().is_none());
        assert!(!c.view().dialog_visible);
    }

    #[test]
    fn open_shows_form_and_focuses_email() {
        let mut c = controller();
        c.open(7);

        assert_eq!(c.state(), ModalState::OpenForm);
        assert_eq!(c.trigger(), Some(&7));
        assert!(c.view().dialog_visible);
        assert!(c.view().form_visible);
        assert!(!c.view().success_visible);
        assert_eq!(c.view().focus, Some(Focus::Email));
    }

    #[test]
    fn open_then_cancel_restores_defaults_and_focus() {
        let mut c = controller();
        c.open(3);
        type_email(&mut c, "half-typed");
        assert_eq!(
            c.submit(),
            SubmitOutcome::Rejected(ValidationError::Malformed("half-typed".to_string()))
        );
        c.cancel();

        let v = c.view();
        assert_eq!(c.state(), ModalState::Closed);
        assert!(c.trigger().is_none());
        assert!(!v.dialog_visible);
        assert!(v.form_visible);
        assert!(!v.success_visible);
        assert!(!v.error_shown);
        assert!(v.email.is_empty());
        assert_eq!(v.focus, Some(Focus::Trigger(3)));
    }

    #[test]
    fn invalid_email_keeps_form_open_without_notifying() {
        let mut c = controller();
        c.open(1);
        type_email(&mut c, "not-an-email");

        assert_eq!(
            c.submit(),
            SubmitOutcome::Rejected(ValidationError::Malformed("not-an-email".to_string()))
        );
        assert_eq!(c.state(), ModalState::OpenForm);
        assert!(c.view().error_shown);
        assert!(c.view().form_visible);
        assert_eq!(c.view().email, "not-an-email");
        assert!(c.launcher().launched.is_empty());
    }

    #[test]
    fn empty_email_is_rejected() {
        let mut c = controller();
        c.open(1);
        assert_eq!(c.submit(), SubmitOutcome::Rejected(ValidationError::Empty));
        type_email(&mut c, "   ");
        assert_eq!(c.submit(), SubmitOutcome::Rejected(ValidationError::Empty));
        assert!(c.launcher().launched.is_empty());
    }

    #[test]
    fn platform_veto_rejects_grammatical_address() {
        let mut c = controller();
        c.open(1);
        type_email(&mut c, " user@example.com ");
        c.view.platform_veto = true;

        assert_eq!(
            c.submit(),
            SubmitOutcome::Rejected(ValidationError::Malformed("user@example.com".to_string()))
        );
        assert_eq!(c.state(), ModalState::OpenForm);
        assert!(c.view().error_shown);
        assert!(c.launcher().launched.is_empty());
    }

    #[test]
    fn valid_email_shows_success_and_launches_once() {
        let mut c = controller();
        c.open(1);
        type_email(&mut c, "not-an-email");
        c.submit();
        type_email(&mut c, "user@example.com");

        let outcome = c.submit();
        let SubmitOutcome::Sent(notification) = outcome else {
            panic!("expected Sent, got {outcome:?}");
        };
        assert_eq!(notification.email.as_str(), "user@example.com");
        assert_eq!(notification.timestamp, "10/19/2026, 9:30:00 AM");

        assert_eq!(c.state(), ModalState::OpenSuccess);
        assert!(!c.view().form_visible);
        assert!(c.view().success_visible);
        assert!(!c.view().error_shown);

        let launched = &c.launcher().launched;
        assert_eq!(launched.len(), 1);
        assert!(launched[0].starts_with("mailto:dmvanmeenen@gmail.com?"));
        assert!(launched[0].contains("user%40example.com"));
        assert!(launched[0].contains("9%3A30%3A00"));
    }

    #[test]
    fn submitted_email_is_trimmed() {
        let mut c = controller();
        c.open(1);
        type_email(&mut c, "  user@example.com  ");
        match c.submit() {
            SubmitOutcome::Sent(n) => assert_eq!(n.email.as_str(), "user@example.com"),
            other => panic!("expected Sent, got {other:?}"),
        }
    }

    #[test]
    fn submit_outside_form_is_ignored() {
        let mut c = controller();
        assert_eq!(c.submit(), SubmitOutcome::Ignored);

        c.open(1);
        type_email(&mut c, "user@example.com");
        c.submit();
        assert_eq!(c.submit(), SubmitOutcome::Ignored);
        assert_eq!(c.launcher().launched.len(), 1);
    }

    #[test]
    fn closing_success_view_resets_for_next_open() {
        let mut c = controller();
        c.open(4);
        type_email(&mut c, "user@example.com");
        c.submit();
        c.cancel();

        assert_eq!(c.state(), ModalState::Closed);
        assert!(c.view().form_visible);
        assert!(!c.view().success_visible);
        assert!(c.view().email.is_empty());
        assert_eq!(c.view().focus, Some(Focus::Trigger(4)));

        c.open(5);
        assert_eq!(c.state(), ModalState::OpenForm);
        assert!(c.view().form_visible);
        assert!(!c.view().success_visible);
    }

    #[test]
    fn backdrop_surface_closes_content_does_not() {
        let mut c = controller();
        c.open(1);
        c.backdrop_click(ClickTarget::Content);
        assert_eq!(c.state(), ModalState::OpenForm);

        c.backdrop_click(ClickTarget::Surface);
        assert_eq!(c.state(), ModalState::Closed);
    }

    #[test]
    fn escape_only_acts_while_open() {
        let mut c = controller();
        c.key_down("Escape");
        assert_eq!(c.state(), ModalState::Closed);
        assert_eq!(c.view().trigger_focus_count, 0);

        c.open(2);
        c.key_down("Enter");
        assert_eq!(c.state(), ModalState::OpenForm);
        c.key_down("Escape");
        assert_eq!(c.state(), ModalState::Closed);
        assert_eq!(c.view().trigger_focus_count, 1);
    }

    #[test]
    fn double_cancel_restores_focus_once() {
        let mut c = controller();
        c.open(9);
        c.cancel();
        c.cancel();
        assert_eq!(c.state(), ModalState::Closed);
        assert_eq!(c.view().trigger_focus_count, 1);
    }

    #[test]
    fn second_open_keeps_first_trigger() {
        let mut c = controller();
        c.open(1);
        c.open(2);
        assert_eq!(c.trigger(), Some(&1));
        c.cancel();
        assert_eq!(c.view().focus, Some(Focus::Trigger(1)));
    }

    #[test]
    fn handle_dispatches_events() {
        let mut c = controller();
        assert_eq!(c.handle(ModalEvent::Open(6)), None);
        c.view.email = "user@example.com".to_string();
        assert!(matches!(
            c.handle(ModalEvent::Submit),
            Some(SubmitOutcome::Sent(_))
        ));
        c.handle(ModalEvent::BackdropClick(ClickTarget::Content));
        assert_eq!(c.state(), ModalState::OpenSuccess);
        c.handle(ModalEvent::KeyDown("Escape".to_string()));
        assert_eq!(c.state(), ModalState::Closed);
        c.handle(ModalEvent::Cancel);
        assert_eq!(c.view().trigger_focus_count, 1);
    }
}

use hyperwave::counter::DisplayRegion;
use hyperwave::{ModalView, Region, WidgetConfig};
use wasm_bindgen::JsCast;

use super::WireError;

pub(super) fn element_by_id<T: JsCast>(
    document: &web_sys::Document,
    id: &str,
    expected: &'static str,
) -> Result<T, WireError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WireError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| WireError::WrongElement {
            id: id.to_string(),
            expected,
        })
}

fn set_shown(el: &web_sys::HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = el.style().set_property("display", display);
}

fn set_class(el: &web_sys::Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// The dialog markup already on the page.
pub(super) struct DomModalView {
    dialog: web_sys::Element,
    form: web_sys::HtmlFormElement,
    form_view: web_sys::HtmlElement,
    success_view: web_sys::HtmlElement,
    email: web_sys::HtmlInputElement,
    email_error: web_sys::Element,
    active_class: String,
    error_class: String,
}

impl DomModalView {
    pub(super) fn bind(document: &web_sys::Document, cfg: &WidgetConfig) -> Result<Self, WireError> {
        let ids = &cfg.elements;
        Ok(Self {
            dialog: element_by_id(document, &ids.dialog, "element")?,
            form: element_by_id(document, &ids.form, "form")?,
            form_view: element_by_id(document, &ids.form_view, "html element")?,
            success_view: element_by_id(document, &ids.success_view, "html element")?,
            email: element_by_id(document, &ids.email_input, "input")?,
            email_error: element_by_id(document, &ids.email_error, "element")?,
            active_class: cfg.active_class.clone(),
            error_class: cfg.error_class.clone(),
        })
    }
}

impl ModalView for DomModalView {
    type Trigger = web_sys::HtmlElement;

    fn set_dialog_visible(&mut self, visible: bool) {
        set_class(&self.dialog, &self.active_class, visible);
    }

    fn set_region_visible(&mut self, region: Region, visible: bool) {
        match region {
            Region::Form => set_shown(&self.form_view, visible),
            Region::Success => set_shown(&self.success_view, visible),
        }
    }

    fn set_email_error(&mut self, shown: bool) {
        set_class(&self.email, &self.error_class, shown);
        set_class(&self.email_error, &self.active_class, shown);
    }

    fn email_value(&self) -> String {
        self.email.value()
    }

    fn email_is_valid(&self) -> bool {
        self.email.validity().valid()
    }

    fn clear_email(&mut self) {
        self.form.reset();
    }

    fn focus_email(&mut self) {
        let _ = self.email.focus();
    }

    fn focus_trigger(&mut self, trigger: &web_sys::HtmlElement) {
        let _ = trigger.focus();
    }
}

/// Element whose text shows the page-view count.
pub(super) struct TextRegion(pub(super) web_sys::Element);

impl DisplayRegion for TextRegion {
    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

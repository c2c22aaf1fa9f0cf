use std::cell::RefCell;
use std::rc::Rc;

use hyperwave::counter::report_page_view;
use hyperwave::{ClickTarget, CountFormatter, Grouping, ModalController, ModalEvent, WidgetConfig};
use thiserror::Error;
use tracing::{debug, error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

mod dom;
mod fetch;
mod launcher;
mod locale;
mod page_config;

use dom::{element_by_id, DomModalView, TextRegion};
use fetch::FetchSource;
use launcher::FrameLauncher;
use locale::{LocaleClock, LocaleFormatter};
use page_config::load_page_config;

type Controller = ModalController<DomModalView, FrameLauncher, LocaleClock>;
type SharedController = Rc<RefCell<Controller>>;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error("failed to register {event} listener: {detail}")]
    Listener { event: &'static str, detail: String },
    #[error("{op} failed: {detail}")]
    Dom { op: &'static str, detail: String },
}

pub(crate) fn js_error_text(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

/// Installs logging and wires the widget once the document has been parsed.
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = tracing_wasm::try_set_as_global_default();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("waitlist widget not wired: {}", WireError::NoDocument);
        return;
    };

    if let Err(e) = when_parsed(&document, boot) {
        error!("waitlist widget not wired: {e}");
    }
}

/// Runs `f` now if the document has been parsed, otherwise on `DOMContentLoaded`.
fn when_parsed(document: &web_sys::Document, f: impl FnOnce() + 'static) -> Result<(), WireError> {
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let on_ready = Closure::once_into_js(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(|e| WireError::Listener {
            event: "DOMContentLoaded",
            detail: js_error_text(&e),
        })
}

fn boot() {
    match wire_page() {
        Ok(()) => info!("waitlist widget ready"),
        Err(e) => error!("waitlist widget not wired: {e}"),
    }
}

fn wire_page() -> Result<(), WireError> {
    let window = web_sys::window().ok_or(WireError::NoWindow)?;
    let document = window.document().ok_or(WireError::NoDocument)?;
    let cfg = load_page_config(&document);

    // The counter is independent of the dialog markup; start it first so a
    // broken dialog does not suppress it.
    spawn_page_view_report(&document, &cfg);
    wire_modal(&document, &cfg)?;
    Ok(())
}

fn spawn_page_view_report(document: &web_sys::Document, cfg: &WidgetConfig) {
    let mut region = document
        .get_element_by_id(&cfg.elements.view_count)
        .map(TextRegion);
    let formatter = count_formatter(cfg);
    let cfg = cfg.clone();
    spawn_local(async move {
        report_page_view(&FetchSource, region.as_mut(), formatter.as_ref(), &cfg).await;
    });
}

/// A configured separator wins over the visitor's locale.
fn count_formatter(cfg: &WidgetConfig) -> Box<dyn CountFormatter> {
    match &cfg.thousands_separator {
        Some(separator) => Box::new(Grouping(separator.clone())),
        None => Box::new(LocaleFormatter),
    }
}

fn wire_modal(
    document: &web_sys::Document,
    cfg: &WidgetConfig,
) -> Result<SharedController, WireError> {
    // Resolve everything first so a page with missing markup ends up with no
    // listeners at all instead of a half-wired dialog.
    let ids = &cfg.elements;
    let trigger: web_sys::HtmlElement = element_by_id(document, &ids.trigger, "html element")?;
    let cancel_controls = ids
        .cancel_controls()
        .into_iter()
        .map(|id| element_by_id::<web_sys::Element>(document, id, "element"))
        .collect::<Result<Vec<_>, _>>()?;
    let form: web_sys::HtmlFormElement = element_by_id(document, &ids.form, "form")?;
    let dialog: web_sys::Element = element_by_id(document, &ids.dialog, "element")?;
    let view = DomModalView::bind(document, cfg)?;

    let launcher = FrameLauncher::new(document.clone(), cfg.link_cleanup_ms);
    let controller: SharedController = Rc::new(RefCell::new(ModalController::new(
        view,
        launcher,
        LocaleClock,
        cfg,
    )));

    let c = controller.clone();
    let opener = trigger.clone();
    listen(&trigger, "click", move |_ev| {
        dispatch(&c, ModalEvent::Open(opener.clone()));
    })?;

    for control in &cancel_controls {
        let c = controller.clone();
        listen(control, "click", move |_ev| dispatch(&c, ModalEvent::Cancel))?;
    }

    let c = controller.clone();
    listen(&form, "submit", move |ev| {
        ev.prevent_default();
        dispatch(&c, ModalEvent::Submit);
    })?;

    let surface: web_sys::EventTarget = dialog.clone().into();
    let c = controller.clone();
    listen(&dialog, "click", move |ev| {
        let target = if ev.target().as_ref() == Some(&surface) {
            ClickTarget::Surface
        } else {
            ClickTarget::Content
        };
        dispatch(&c, ModalEvent::BackdropClick(target));
    })?;

    let c = controller.clone();
    listen(document, "keydown", move |ev| {
        if let Some(key) = ev.dyn_ref::<web_sys::KeyboardEvent>().map(|k| k.key()) {
            dispatch(&c, ModalEvent::KeyDown(key));
        }
    })?;

    Ok(controller)
}

fn listen(
    target: &web_sys::EventTarget,
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), WireError> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| WireError::Listener {
            event,
            detail: js_error_text(&e),
        })?;
    // Listeners live as long as the page.
    cb.forget();
    Ok(())
}

fn dispatch(controller: &SharedController, event: ModalEvent<web_sys::HtmlElement>) {
    // A focus change inside a transition can re-enter a listener; drop the
    // nested event instead of panicking on the borrow.
    let Ok(mut c) = controller.try_borrow_mut() else {
        debug!("waitlist event dropped: controller busy");
        return;
    };
    c.handle(event);
}

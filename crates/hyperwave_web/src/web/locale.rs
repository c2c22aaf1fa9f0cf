use hyperwave::{Clock, CountFormatter};
use wasm_bindgen::prelude::*;

/// Visitor-local time via `Date.prototype.toLocaleString`.
pub(super) struct LocaleClock;

impl Clock for LocaleClock {
    fn local_timestamp(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("default", &JsValue::UNDEFINED)
            .into()
    }
}

/// Digit grouping from the visitor's locale via `Number.prototype.toLocaleString`.
pub(super) struct LocaleFormatter;

impl CountFormatter for LocaleFormatter {
    fn format(&self, n: u64) -> String {
        // Counts past 2^53 lose precision here; the counter service never
        // gets near that.
        js_sys::Number::from(n as f64)
            .to_locale_string("default")
            .into()
    }
}

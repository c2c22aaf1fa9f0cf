use hyperwave::WidgetConfig;
use tracing::warn;

/// Optional `<script type="application/json">` block overriding the defaults.
pub(super) const CONFIG_ELEMENT_ID: &str = "hyperwave-config";

pub(super) fn load_page_config(document: &web_sys::Document) -> WidgetConfig {
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return WidgetConfig::default();
    };
    let raw = el.text_content().unwrap_or_default();
    match WidgetConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("ignoring malformed #{CONFIG_ELEMENT_ID}: {e}");
            WidgetConfig::default()
        }
    }
}

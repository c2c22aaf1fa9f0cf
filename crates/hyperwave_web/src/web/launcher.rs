use hyperwave::DeepLinkLauncher;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{js_error_text, WireError};

/// Opens `mailto:` links through a hidden, short-lived iframe so the landing
/// page itself never navigates.
pub(super) struct FrameLauncher {
    document: web_sys::Document,
    cleanup_ms: u32,
}

impl FrameLauncher {
    pub(super) fn new(document: web_sys::Document, cleanup_ms: u32) -> Self {
        Self {
            document,
            cleanup_ms,
        }
    }

    fn try_launch(&self, uri: &str) -> Result<(), WireError> {
        let window = web_sys::window().ok_or(WireError::NoWindow)?;
        let body = self
            .document
            .body()
            .ok_or_else(|| WireError::MissingElement("body".to_string()))?;

        let frame = self
            .document
            .create_element("iframe")
            .map_err(|e| WireError::Dom {
                op: "createElement(iframe)",
                detail: js_error_text(&e),
            })?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .map_err(|_| WireError::Dom {
                op: "createElement(iframe)",
                detail: "not an iframe".to_string(),
            })?;
        let _ = frame.style().set_property("display", "none");
        frame.set_src(uri);
        body.append_child(&frame).map_err(|e| WireError::Dom {
            op: "appendChild(iframe)",
            detail: js_error_text(&e),
        })?;

        // Something else may have detached the frame already; only remove it
        // if it still has a parent.
        let remove = Closure::once_into_js(move || {
            if let Some(parent) = frame.parent_node() {
                let _ = parent.remove_child(&frame);
            }
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                self.cleanup_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|e| WireError::Dom {
                op: "setTimeout",
                detail: js_error_text(&e),
            })?;
        Ok(())
    }
}

impl DeepLinkLauncher for FrameLauncher {
    fn launch(&mut self, uri: &str) {
        match self.try_launch(uri) {
            Ok(()) => debug!(cleanup_ms = self.cleanup_ms, "deep link handed to iframe"),
            Err(e) => warn!("deep link not launched: {e}"),
        }
    }
}

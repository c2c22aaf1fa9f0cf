use hyperwave::{FetchError, ViewCountSource};
use wasm_bindgen::JsCast;

use super::js_error_text;

/// `window.fetch` with `cache: "no-store"`.
pub(super) struct FetchSource;

impl ViewCountSource for FetchSource {
    async fn fetch(&self, endpoint: &str) -> Result<String, FetchError> {
        let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;

        let init = web_sys::RequestInit::new();
        init.set_method("GET");
        init.set_cache(web_sys::RequestCache::NoStore);

        let resp = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str_and_init(endpoint, &init))
            .await
            .map_err(|e| FetchError::Network(js_error_text(&e)))?;
        let resp = resp
            .dyn_into::<web_sys::Response>()
            .map_err(|_| FetchError::Network("fetch resolved to a non-Response".to_string()))?;

        let text = resp
            .text()
            .map_err(|e| FetchError::Decode(js_error_text(&e)))?;
        let body = wasm_bindgen_futures::JsFuture::from(text)
            .await
            .map_err(|e| FetchError::Network(js_error_text(&e)))?;
        body.as_string()
            .ok_or_else(|| FetchError::Decode("response body is not text".to_string()))
    }
}

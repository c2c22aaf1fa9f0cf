//! Page-view counter readout.
//!
//! One read per page load, no retries. The fetch is the only asynchronous
//! piece; turning its result into display text is a pure function so the
//! rendering rules can be tested without a network or a document.

use crate::config::WidgetConfig;
use crate::error::FetchError;

/// Shown in place of the count whenever the read fails for any reason.
pub const FALLBACK_GLYPH: &str = "—";

/// Issues the single page-view read. Implementations must bypass HTTP caches.
// Single-threaded host; callers never need the future to be `Send`.
#[allow(async_fn_in_trait)]
pub trait ViewCountSource {
    /// Returns the raw response body.
    async fn fetch(&self, endpoint: &str) -> Result<String, FetchError>;
}

/// Element whose text shows the count.
pub trait DisplayRegion {
    fn set_text(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewCount(pub u64);

/// Decodes `{"count": <number>}`. Negative or fractional counts are treated
/// the same as a missing field.
pub fn parse_view_count(body: &str) -> Result<ViewCount, FetchError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    let count = value.get("count").ok_or(FetchError::MissingCount)?;

    if let Some(n) = count.as_u64() {
        return Ok(ViewCount(n));
    }
    match count.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(ViewCount(f as u64)),
        _ => Err(FetchError::MissingCount),
    }
}

/// Turns a count into display text. The browser groups digits per the
/// visitor's locale; other hosts can use [`Grouping`].
pub trait CountFormatter {
    fn format(&self, n: u64) -> String;
}

/// Fixed thousands separator, independent of any locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping(pub String);

impl Default for Grouping {
    fn default() -> Self {
        Self(",".to_string())
    }
}

impl CountFormatter for Grouping {
    fn format(&self, n: u64) -> String {
        format_count(n, &self.0)
    }
}

/// Groups digits in threes: `1234567` with `","` becomes `"1,234,567"`.
pub fn format_count(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

pub fn display_text<F>(result: &Result<ViewCount, FetchError>, formatter: &F) -> String
where
    F: CountFormatter + ?Sized,
{
    match result {
        Ok(ViewCount(n)) => formatter.format(*n),
        Err(_) => FALLBACK_GLYPH.to_string(),
    }
}

/// Reads the counter once and renders it. The request is issued even when the
/// page has no display region; failures only ever show up as the fallback
/// glyph.
pub async fn report_page_view<S, D, F>(
    source: &S,
    display: Option<&mut D>,
    formatter: &F,
    cfg: &WidgetConfig,
) where
    S: ViewCountSource,
    D: DisplayRegion,
    F: CountFormatter + ?Sized,
{
    let result = match source.fetch(&cfg.page_view_endpoint).await {
        Ok(body) => parse_view_count(&body),
        Err(e) => Err(e),
    };
    if let Some(display) = display {
        display.set_text(&display_text(&result, formatter));
    }
}

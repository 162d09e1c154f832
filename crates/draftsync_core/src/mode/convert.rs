//! Pure converters between rich markup and plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br regex"));
static BLOCK_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|div|li|h[1-6]|blockquote|tr)\s*>").expect("valid block end regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static EXCESS_NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline collapse regex"));

/// Strips markup down to plain text.
///
/// Line breaks and block boundaries become newlines so paragraph shape
/// survives the conversion; remaining tags are discarded and the common
/// entities decoded.
pub fn rich_to_plain(body: &str) -> String {
    let normalized = body.replace("\r\n", "\n");
    let with_breaks = LINE_BREAK_RE.replace_all(&normalized, "\n");
    let with_blocks = BLOCK_END_RE.replace_all(&with_breaks, "\n");
    let stripped = TAG_RE.replace_all(&with_blocks, "");
    let decoded = decode_entities(&stripped);
    let collapsed = EXCESS_NEWLINE_RE.replace_all(&decoded, "\n\n");
    collapsed.trim().to_string()
}

/// Wraps plain text in minimal rich markup.
///
/// The inverse is lossy only in whitespace shape: newlines become `<br>`
/// inside a single paragraph.
pub fn plain_to_rich(text: &str) -> String {
    if text.trim().is_empty() {
        return "<p><br></p>".to_string();
    }
    let escaped = escape_markup(text);
    format!("<p>{}</p>", escaped.replace('\n', "<br>"))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

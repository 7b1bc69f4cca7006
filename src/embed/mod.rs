//! Pages compiled into the binary.
//!
//! ```ignore
//! let html = embed::not_found_page("/en/latest/gone/");
//! ```

use std::borrow::Cow;

/// Platform default 404 page, with `__PATH__` and `__VERSION__` slots.
const NOT_FOUND_HTML: &str = include_str!("serve/not_found.html");

/// Render the platform default 404 page for a request path.
///
/// The path comes from the client, so it is escaped before insertion.
pub fn not_found_page(path: &str) -> String {
    NOT_FOUND_HTML
        .replace("__PATH__", &escape(path))
        .replace("__VERSION__", env!("CARGO_PKG_VERSION"))
}

/// Escape text for an HTML element body or a quoted attribute.
fn escape(text: &str) -> Cow<'_, str> {
    let Some(start) = text.find(['<', '>', '&', '"', '\'']) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..start]);
    for c in text[start..].chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

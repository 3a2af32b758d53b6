//! Markup escaping for display text.

/// Escape text for insertion into HTML markup.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with entity codes. The ampersand goes
/// first so entities produced by the later replacements are not escaped twice.
///
/// # Examples
///
/// ```
/// use spiceaura_core::escape_html;
///
/// assert_eq!(escape_html("Salt & <Pepper>"), "Salt &amp; &lt;Pepper&gt;");
/// assert_eq!(escape_html("Grandma's \"Secret\""), "Grandma&#039;s &quot;Secret&quot;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Escapes HTML-significant characters so model output cannot be interpreted
/// as markup by a renderer. `&` goes first so entities introduced by the
/// later substitutions are not themselves re-escaped; the escape is applied
/// exactly once per response.
pub fn sanitize_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

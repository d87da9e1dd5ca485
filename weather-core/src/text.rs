/// Upper-cases the first character and lower-cases the rest.
///
/// Idempotent, so the provider's own casing never leaks through:
/// `"light rain"` and `"LIGHT RAIN"` both become `"Light rain"`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Cuts a response body down to something that fits in an error message.
pub fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

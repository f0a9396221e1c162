use super::models::{ContentFields, field_text};

/// Content fields that make it into the rendered text, in output order.
/// Anything else (ratings, confidence, flags, ...) is left out on purpose.
pub const RENDERED_FIELDS: [&str; 7] = [
    "title",
    "summary",
    "strengths",
    "weaknesses",
    "questions",
    "comment",
    "metareview",
];

/// Render the recognized content fields of a reply as a single text block.
///
/// Each present field becomes `"\n{name}:\n{value}\n"`; blocks follow
/// [`RENDERED_FIELDS`] order regardless of the input order and the result is
/// trimmed. Returns an empty string when no recognized field is present.
pub fn render_text(content: &ContentFields) -> String {
    let mut text = String::new();
    for name in RENDERED_FIELDS {
        let Some(value) = content.get(name).and_then(field_text) else {
            continue;
        };
        text.push_str(&format!("\n{name}:\n{value}\n"));
    }
    text.trim().to_string()
}

//! # Atlassian Document Format Helpers
//!
//! Jira Cloud API v3 sends and receives formatted text fields
//! (descriptions, comment bodies) as typed document trees rather than
//! plain strings. This adapter only ever writes the minimal shape — one
//! paragraph holding one text run — and reads back only that same
//! shape: `plain_text` extracts the first paragraph's first text run
//! and ignores lists, marks, and any further paragraphs. The two
//! directions round-trip plain strings exactly.

use serde_json::{Value, json};

/// Wrap plain text in the minimal ADF document shape.
pub fn text_document(text: &str) -> Value {
  json!({
      "type": "doc",
      "version": 1,
      "content": [
          {
              "type": "paragraph",
              "content": [
                  {
                      "type": "text",
                      "text": text
                  }
              ]
          }
      ]
  })
}

/// Extract the first paragraph's first text run from an ADF document.
///
/// Returns `None` when the value is not a document with at least one
/// text node, or when it is a bare string (older API versions return
/// plain strings, which are passed through unchanged).
pub fn plain_text(doc: &Value) -> Option<String> {
  if let Some(s) = doc.as_str() {
    return Some(s.to_string());
  }

  let text = doc
    .get("content")?
    .as_array()?
    .first()?
    .get("content")?
    .as_array()?
    .first()?
    .get("text")?
    .as_str()?;

  Some(text.to_string())
}

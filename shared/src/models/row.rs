//! Loosely-typed tabular rows as read from a sheet or a JSON file
//!
//! Headers vary in casing and punctuation between sheets (`Event Type`,
//! `eventType`, `event_type`), so every lookup goes through [`fold_key`].

use serde_json::{Map, Value};

/// One data row: header -> cell value, in column order
pub type Row = Map<String, Value>;

/// Fold a header for alias matching: lowercase, alphanumerics only
pub fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Render a cell as trimmed text
///
/// Numbers are rendered with their JSON representation. Booleans, null,
/// nested values and blank strings yield `None`.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Alias-based field access over a [`Row`]
pub trait RowExt {
    /// First non-blank cell whose folded header equals one of `aliases`.
    /// Aliases are tried in order, so earlier aliases win.
    fn field(&self, aliases: &[&str]) -> Option<String>;
}

impl RowExt for Row {
    fn field(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            self.iter()
                .filter(|(header, _)| fold_key(header) == *alias)
                .find_map(|(_, value)| cell_text(value))
        })
    }
}

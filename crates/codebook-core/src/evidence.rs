//! Evidence attributed to a category.
//!
//! Evidence is always an ordered list of strings. Replies may give a single
//! string, a list, `null`, or a nested object (e.g. `{"snippet": .., "explanation": ..}`);
//! all of these are flattened into the list with the strings kept verbatim.
//! Blank strings are dropped, and a list left with nothing holds the
//! [`NO_EVIDENCE`] sentinel.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sentinel the service is told to use when a category has no match.
pub const NO_EVIDENCE: &str = "no evidence found";

/// Shown by hosts when a category has no evidence.
pub const NO_CONTENT: &str = "No relevant content found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Evidence(Vec<String>);

impl Default for Evidence {
    fn default() -> Self {
        Self::none()
    }
}

impl Evidence {
    /// The sentinel value: `["no evidence found"]`.
    pub fn none() -> Self {
        Self(vec![NO_EVIDENCE.to_string()])
    }

    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Vec::new();
        for item in items {
            push_item(&mut out, item.into());
        }
        Self::finish(out)
    }

    /// Coerce an arbitrary reply value into evidence.
    pub fn from_value(value: &Value) -> Self {
        let mut out = Vec::new();
        collect(value, &mut out);
        Self::finish(out)
    }

    fn finish(items: Vec<String>) -> Self {
        if items.is_empty() {
            Self::none()
        } else {
            Self(items)
        }
    }

    /// True when every item is a "nothing found" sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|s| is_sentinel(s))
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Items joined by newlines, or [`NO_CONTENT`] when there is no evidence.
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            NO_CONTENT.to_string()
        } else {
            self.0.join("\n")
        }
    }
}

impl<'de> Deserialize<'de> for Evidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn collect(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => push_item(out, b.to_string()),
        Value::Number(n) => push_item(out, n.to_string()),
        Value::String(s) => push_item(out, s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect(v, out)),
    }
}

fn push_item(out: &mut Vec<String>, item: String) {
    if !item.trim().is_empty() {
        out.push(item);
    }
}

fn is_sentinel(s: &str) -> bool {
    let s = s.trim().trim_end_matches('.');
    s.eq_ignore_ascii_case(NO_EVIDENCE) || s.eq_ignore_ascii_case(NO_CONTENT)
}

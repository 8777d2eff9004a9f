// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded INP model
//!
//! Blocks hold records, records hold ordered fields. Field names are kept
//! exactly as written in the file (including surrounding double quotes for
//! object names such as `"Baseline Glass"`), so callers query by name.

use smallvec::SmallVec;
use std::borrow::Cow;

/// One line of the source file with its 1-based ordinal
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Field value: a single token or a list of continuation tokens
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Get as scalar token
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// Get as continuation list
    #[inline]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Scalar(_) => None,
        }
    }

    /// Full text of the value; list tokens are joined with a single space
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Scalar(s) => Cow::Borrowed(s.as_str()),
            FieldValue::List(items) => Cow::Owned(items.join(" ")),
        }
    }

    /// Text with a single pair of surrounding double quotes removed
    pub fn unquoted(&self) -> Cow<'_, str> {
        match self.text() {
            Cow::Borrowed(s) => Cow::Borrowed(strip_quotes(s)),
            Cow::Owned(s) => Cow::Owned(strip_quotes(&s).to_string()),
        }
    }

    /// Parse the value as a number, ignoring surrounding parentheses
    pub fn as_f64(&self) -> Option<f64> {
        let text = self.text();
        let trimmed = text.trim().trim_start_matches('(').trim_end_matches(')').trim();
        trimmed.parse::<f64>().ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Append a continuation token, promoting a scalar to a list
    pub(crate) fn push(&mut self, token: String) {
        match self {
            FieldValue::List(items) => items.push(token),
            FieldValue::Scalar(s) => {
                let first = std::mem::take(s);
                *self = if first.is_empty() {
                    FieldValue::List(vec![token])
                } else {
                    FieldValue::List(vec![first, token])
                };
            }
        }
    }
}

/// Remove one pair of surrounding double quotes
#[inline]
pub fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Ordered field-name → value mapping for one INP object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Line the record started on
    pub line: usize,
    fields: SmallVec<[(String, FieldValue); 8]>,
}

impl Record {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: SmallVec::new(),
        }
    }

    /// Set or overwrite a field. Overwriting keeps the original position.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Get a field by exact name
    #[inline]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar value of a field
    #[inline]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    /// Numeric value of a field
    #[inline]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_f64)
    }

    /// Non-empty field present
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Field present whose name matches `name` with or without surrounding quotes
    pub fn has_name(&self, name: &str) -> bool {
        let name = strip_quotes(name);
        self.fields.iter().any(|(k, _)| strip_quotes(k) == name)
    }

    /// True if any scalar field value equals `value`
    pub fn has_value(&self, value: &str) -> bool {
        self.fields
            .iter()
            .any(|(_, v)| v.as_str().is_some_and(|s| s == value))
    }

    /// First field name containing `pattern`
    pub fn find_key(&self, pattern: &str) -> Option<&str> {
        self.fields
            .iter()
            .map(|(k, _)| k.as_str())
            .find(|k| k.contains(pattern))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Named section of the file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub name: String,
    /// Line of the block's name
    pub line: usize,
    pub records: Vec<Record>,
}

impl Block {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            records: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut record = Record::new(1);
        record.set("A", FieldValue::Scalar("1".into()));
        record.set("B", FieldValue::Scalar("2".into()));
        record.set("A", FieldValue::Scalar("3".into()));

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(record.get_str("A"), Some("3"));
    }

    #[test]
    fn test_push_promotes_scalar() {
        let mut value = FieldValue::Scalar("( 1, 2,".into());
        value.push("3 )".into());
        assert_eq!(
            value,
            FieldValue::List(vec!["( 1, 2,".into(), "3 )".into()])
        );
        assert_eq!(value.text(), "( 1, 2, 3 )");
    }

    #[test]
    fn test_numeric_value_strips_parentheses() {
        assert_eq!(FieldValue::Scalar("( 1.1 )".into()).as_f64(), Some(1.1));
        assert_eq!(FieldValue::Scalar("0.35".into()).as_f64(), Some(0.35));
        assert_eq!(FieldValue::Scalar("FLOOR".into()).as_f64(), None);
    }

    #[test]
    fn test_has_name_ignores_quotes() {
        let mut record = Record::new(1);
        record.set("\"Baseline Glass\"", FieldValue::Scalar("GLASS-TYPE".into()));
        assert!(record.has_name("Baseline Glass"));
        assert!(record.has_name("\"Baseline Glass\""));
        assert!(!record.has_name("Proposed Glass"));
    }
}

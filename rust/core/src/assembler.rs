// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record assembly
//!
//! Turns the body lines of one block into records. A record is a run of
//! lines closed by a line ending in `..`:
//!
//! ```text
//! "Baseline Glass" = GLASS-TYPE          <- name line (key/value)
//!    SHADING-COEF     = 0.5              <- field
//!    GLASS-CONDUCT    = 0.57
//!    ..                                  <- terminator
//! ```
//!
//! Lines without `=` are classified by their neighbours: between two
//! terminators they are bare keywords (`END`, `COMPUTE`); directly before a
//! terminator or inside an open parenthesis they continue the last field;
//! otherwise they name a record.

use crate::error::{Error, Result};
use crate::model::{FieldValue, RawLine, Record};
use crate::segmenter::is_comment;

/// Record terminator suffix
const TERMINATOR: &str = "..";

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Terminator,
    /// `key = value`, optionally closed by a trailing `..`
    Field {
        key: String,
        value: String,
        closes: bool,
    },
    Bare(&'a str),
}

fn classify(text: &str) -> LineKind<'_> {
    let trimmed = text.trim();
    match trimmed.split_once('=') {
        Some((key, value)) => {
            let value = value.trim();
            let (value, closes) = match value.strip_suffix(TERMINATOR) {
                Some(head) => (head.trim_end(), true),
                None => (value, false),
            };
            LineKind::Field {
                key: key.replace('\'', "").trim().to_string(),
                value: value.replace('\'', ""),
                closes,
            }
        }
        None if trimmed.ends_with(TERMINATOR) => LineKind::Terminator,
        None => LineKind::Bare(trimmed),
    }
}

#[inline]
fn is_terminator(line: &RawLine) -> bool {
    matches!(classify(&line.text), LineKind::Terminator)
}

/// Key text for a bare line: comment and emphasis markers removed
fn clean_key(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '$' | '*' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Decorative separator such as `*****` or `=====`.
///
/// Parentheses and quotes never count, so a lone `)` still continues a list.
fn is_separator(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.ends_with(TERMINATOR)
        && trimmed.chars().all(|c| {
            c.is_whitespace() || (c.is_ascii_punctuation() && !matches!(c, '(' | ')' | '"'))
        })
}

#[inline]
fn has_open_paren(value: &FieldValue) -> bool {
    let text = value.text();
    text.matches('(').count() > text.matches(')').count()
}

/// Record being built
struct OpenRecord {
    record: Record,
    /// Last key set by a `key = value` line
    last_key: Option<String>,
}

impl OpenRecord {
    fn new() -> Self {
        Self {
            record: Record::new(0),
            last_key: None,
        }
    }

    fn touch(&mut self, line: usize) {
        if self.record.is_empty() {
            self.record.line = line;
        }
    }

    fn last_value(&self) -> Option<&FieldValue> {
        self.last_key.as_deref().and_then(|k| self.record.get(k))
    }

    /// Append a continuation token to the last field. Returns false if none was set.
    fn continue_last(&mut self, token: &str) -> bool {
        let Some(key) = self.last_key.as_deref() else {
            return false;
        };
        match self.record.get_mut(key) {
            Some(value) => {
                value.push(token.to_string());
                true
            }
            None => false,
        }
    }

    fn close(&mut self, out: &mut Vec<Record>) {
        let record = std::mem::replace(&mut self.record, Record::new(0));
        self.last_key = None;
        if !record.is_empty() {
            out.push(record);
        }
    }
}

/// Assemble the body lines of block `block` into records.
///
/// Blank lines, `$` comments and all-punctuation separators are skipped. A body that ends while a
/// record is still open fails with [`Error::IncompleteRecord`].
pub fn assemble_records(block: &str, lines: &[RawLine]) -> Result<Vec<Record>> {
    let significant: Vec<&RawLine> = lines
        .iter()
        .filter(|l| !l.text.trim().is_empty() && !is_comment(&l.text) && !is_separator(&l.text))
        .collect();

    let mut records = Vec::new();
    let mut open = OpenRecord::new();

    for (i, line) in significant.iter().enumerate() {
        match classify(&line.text) {
            LineKind::Terminator => open.close(&mut records),

            LineKind::Field { key, value, closes } => {
                open.touch(line.number);
                open.record.set(key.clone(), FieldValue::Scalar(value));
                open.last_key = Some(key);
                if closes {
                    open.close(&mut records);
                }
            }

            LineKind::Bare(text) => {
                open.touch(line.number);
                let next_is_terminator = significant.get(i + 1).is_some_and(|l| is_terminator(l));
                let prev_is_terminator = i == 0 || is_terminator(significant[i - 1]);
                let in_parens = open.last_value().is_some_and(has_open_paren);

                if next_is_terminator && prev_is_terminator {
                    open.record.set(clean_key(text), FieldValue::Scalar(String::new()));
                } else if (next_is_terminator || in_parens) && open.continue_last(text) {
                    // appended to the previous field
                } else {
                    open.record.set(clean_key(text), FieldValue::List(Vec::new()));
                }
            }
        }
    }

    if !open.record.is_empty() {
        return Err(Error::IncompleteRecord {
            block: block.to_string(),
            line: open.record.line,
        });
    }

    Ok(records)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Block segmentation
//!
//! INP files are divided into sections by a three-line banner:
//!
//! ```text
//! $ ---------------------------------------------------------
//! $              Glass Types
//! $ ---------------------------------------------------------
//! ```
//!
//! The segmenter walks the lines once, opening a [`Block`] per banner and
//! handing each body to the record assembler when the next banner (or the
//! end of the file) is reached.

use memchr::memmem;

use crate::assembler::assemble_records;
use crate::error::{Error, Result};
use crate::model::{Block, RawLine};
use crate::normalizer::normalize_line;

/// Block-boundary marker
const DELIMITER: &[u8] = b"$ -";

/// Marker on the first line of every INP file
const INPUT_MARKER: &str = "INPUT ..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first banner
    Scanning,
    /// Saw a delimiter; the next line names the block
    HeaderNameExpected { delimiter_line: usize },
    /// Saw the name; one closing delimiter may follow
    AfterHeaderName,
    InBody,
}

/// Parsing state for one pass over a file
struct Segmenter {
    state: State,
    blocks: Vec<Block>,
    body: Vec<RawLine>,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            state: State::Scanning,
            blocks: Vec::new(),
            body: Vec::new(),
        }
    }

    fn current_block_name(&self) -> &str {
        self.blocks.last().map(|b| b.name.as_str()).unwrap_or("")
    }

    /// Assemble the pending body into the current block
    fn flush_body(&mut self) -> Result<()> {
        if self.body.is_empty() {
            return Ok(());
        }
        let body = std::mem::take(&mut self.body);
        if let Some(block) = self.blocks.last_mut() {
            let records = assemble_records(&block.name, &body)?;
            block.records.extend(records);
        }
        Ok(())
    }

    fn push_body_line(&mut self, line: &RawLine) -> Result<()> {
        let text = line.text.as_str();
        if !is_comment(text) && text.bytes().filter(|&b| b == b'"').count() % 2 != 0 {
            return Err(Error::structural(
                line.number,
                self.current_block_name(),
                "unbalanced double quote",
            ));
        }
        // Parametric expressions the arithmetic grammar rejects stay as written
        let text = normalize_line(text)
            .map(|normalized| normalized.into_owned())
            .unwrap_or_else(|_| text.to_string());
        self.body.push(RawLine::new(line.number, text));
        Ok(())
    }

    fn feed(&mut self, line: &RawLine) -> Result<()> {
        let delimiter = is_delimiter(&line.text);

        match self.state {
            State::Scanning | State::InBody if delimiter => {
                self.flush_body()?;
                self.state = State::HeaderNameExpected {
                    delimiter_line: line.number,
                };
            }
            State::Scanning => {}
            State::HeaderNameExpected { delimiter_line } => {
                let name = header_name(&line.text);
                if delimiter || name.is_empty() {
                    return Err(Error::structural(
                        delimiter_line,
                        self.current_block_name(),
                        "delimiter line is not followed by a block name",
                    ));
                }
                self.blocks.push(Block::new(name, line.number));
                self.state = State::AfterHeaderName;
            }
            State::AfterHeaderName => {
                self.state = State::InBody;
                if !delimiter {
                    self.push_body_line(line)?;
                }
            }
            State::InBody => self.push_body_line(line)?,
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Block>> {
        if let State::HeaderNameExpected { delimiter_line } = self.state {
            return Err(Error::structural(
                delimiter_line,
                self.current_block_name(),
                "file ends after a delimiter line",
            ));
        }
        self.flush_body()?;
        Ok(self.blocks)
    }
}

/// Split raw lines into named blocks with assembled records.
///
/// Blocks are returned in encounter order; redeclared names are kept as
/// separate blocks.
pub fn segment(lines: &[RawLine]) -> Result<Vec<Block>> {
    let mut segmenter = Segmenter::new();

    for (index, line) in lines.iter().enumerate() {
        if index == 0 && is_input_marker(&line.text) {
            segmenter.blocks.push(Block::new(header_name(&line.text), line.number));
            continue;
        }
        segmenter.feed(line)?;
    }

    segmenter.finish()
}

/// Block-boundary marker line
#[inline]
pub fn is_delimiter(line: &str) -> bool {
    memmem::find(line.as_bytes(), DELIMITER).is_some()
}

/// `$`-prefixed comment line
#[inline]
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('$')
}

#[inline]
fn is_input_marker(line: &str) -> bool {
    line.trim_end().ends_with(INPUT_MARKER)
}

/// Block name from a banner line: marker characters, `..` and whitespace removed
fn header_name(line: &str) -> String {
    line.trim()
        .trim_start_matches('$')
        .replace("..", "")
        .trim()
        .to_string()
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for INP decoding.

use thiserror::Error;

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding an INP file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Delimiters or quoting could not be matched. Aborts the whole file.
    #[error("structural parse error at line {line} in block '{block}': {message}")]
    StructuralParse {
        line: usize,
        block: String,
        message: String,
    },

    /// A block body ended while a record was still open.
    #[error("incomplete record in block '{block}' starting at line {line}: missing '..' terminator")]
    IncompleteRecord { block: String, line: usize },

    /// A bracketed expression could not be evaluated.
    #[error("expression error: {0}")]
    Expression(String),
}

impl Error {
    /// Build a structural parse error
    pub fn structural(line: usize, block: impl Into<String>, message: impl Into<String>) -> Self {
        Error::StructuralParse {
            line,
            block: block.into(),
            message: message.into(),
        }
    }

    /// Line ordinal the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::StructuralParse { line, .. } | Error::IncompleteRecord { line, .. } => {
                Some(*line)
            }
            Error::Expression(_) => None,
        }
    }
}

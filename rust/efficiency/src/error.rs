// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for efficiency and baseline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by table loading and baseline analysis
#[derive(Error, Debug)]
pub enum Error {
    /// A reference lookup (zip code, state rates, ...) found no row
    #[error("No {table} entry for '{key}'")]
    MissingReference { table: &'static str, key: String },

    /// An injected table is malformed
    #[error("Invalid efficiency table: {0}")]
    InvalidTable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn missing(table: &'static str, key: impl ToString) -> Self {
        Error::MissingReference {
            table,
            key: key.to_string(),
        }
    }
}

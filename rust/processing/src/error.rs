// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for extraction
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(#[from] inp_lite_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] inp_lite_geometry::Error),

    /// The block an extractor reads is not in the file
    #[error("Block '{0}' not found")]
    MissingBlock(&'static str),

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # INP-Lite Core Decoder
//!
//! Decoder for eQUEST/DOE-2 building input (`.inp`) files built with
//! [nom](https://docs.rs/nom) and [memchr](https://docs.rs/memchr).
//!
//! ## Overview
//!
//! - **Segmentation**: splits the file into named blocks at `$ ---` banners
//! - **Expression normalization**: evaluates inline `{1/3.2}` arithmetic
//! - **Record assembly**: groups body lines into `..`-terminated records
//!   with ordered, multi-line field values
//!
//! ## Quick Start
//!
//! ```rust
//! use inp_lite_core::InpDocument;
//!
//! let content = "INPUT ..\n\
//! $ ---------------------------------------------------------\n\
//! $              Glass Types\n\
//! $ ---------------------------------------------------------\n\
//! \"Baseline Glass\" = GLASS-TYPE\n   SHADING-COEF = 0.5\n   ..\n";
//!
//! let doc = InpDocument::parse(content).unwrap();
//! let glass = doc.records_in("Glass Types").next().unwrap();
//! assert_eq!(glass.get_str("SHADING-COEF"), Some("0.5"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for decoded data

pub mod assembler;
pub mod document;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod segmenter;

pub use assembler::assemble_records;
pub use document::InpDocument;
pub use error::{Error, Result};
pub use model::{strip_quotes, Block, FieldValue, RawLine, Record};
pub use normalizer::{evaluate, normalize_line, to_fixed};
pub use segmenter::segment;

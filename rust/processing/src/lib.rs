// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # INP-Lite Processing
//!
//! Derives building-performance parameters (envelope, lighting, rates,
//! HVAC, floor area, schedules, occupancy) from a decoded INP file.
//!
//! ```rust
//! use inp_lite_processing::process_content;
//!
//! let content = "INPUT ..\n\
//! $ ---------------------------------------------------------\n\
//! $              Glass Types\n\
//! $ ---------------------------------------------------------\n\
//! \"Baseline Glass\" = GLASS-TYPE\n\
//!    SHADING-COEF     = 0.29\n\
//!    GLASS-CONDUCT    = 0.57\n\
//!    ..\n";
//!
//! let report = process_content(content).unwrap();
//! assert_eq!(report.result.shading_coefficient, "0.29");
//! ```

pub mod context;
pub mod error;
pub mod extractors;
pub mod pipeline;
pub mod result;

pub use context::ExtractionContext;
pub use error::{Error, Result};
pub use extractors::Extractor;
pub use pipeline::{extract, process_batch, process_content, process_lines, ExtractionPipeline};
pub use result::{ExtractionReport, ExtractionWarning, ResultAggregate, UniqueList};

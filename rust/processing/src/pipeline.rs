// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction pipeline
//!
//! Runs each registered extractor in order over one decoded document. An
//! extractor failure becomes a warning on the report and never stops the
//! extractors after it.

use inp_lite_core::{InpDocument, RawLine};
use rayon::prelude::*;

use crate::context::ExtractionContext;
use crate::error::{Error, Result};
use crate::extractors::{
    ChillerExtractor, Extractor, FloorAreaExtractor, FloorMultiplierExtractor, GlazingExtractor,
    HeatingFallbackExtractor, HvacExtractor, LightingExtractor, MaterialsExtractor,
    OccupancyExtractor, ScheduleExtractor, UtilityRatesExtractor,
};
use crate::result::{ExtractionReport, ExtractionWarning};

/// Ordered set of extractors
pub struct ExtractionPipeline {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Pipeline with the default extractors.
    ///
    /// Multipliers run before floor area, and the heating fallback runs last
    /// so it sees everything the primary HVAC pass found.
    pub fn new() -> Self {
        let mut pipeline = Self::empty();

        pipeline.register(Box::new(FloorMultiplierExtractor));
        pipeline.register(Box::new(GlazingExtractor));
        pipeline.register(Box::new(MaterialsExtractor));
        pipeline.register(Box::new(LightingExtractor));
        pipeline.register(Box::new(UtilityRatesExtractor));
        pipeline.register(Box::new(HvacExtractor));
        pipeline.register(Box::new(ChillerExtractor));
        pipeline.register(Box::new(FloorAreaExtractor));
        pipeline.register(Box::new(ScheduleExtractor));
        pipeline.register(Box::new(OccupancyExtractor));
        pipeline.register(Box::new(HeatingFallbackExtractor));

        pipeline
    }

    /// Pipeline with no extractors
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Append an extractor
    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    /// Names of the registered extractors in run order
    pub fn extractor_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extractors.iter().map(|e| e.name())
    }

    pub fn run(&self, doc: &InpDocument) -> ExtractionReport {
        let mut ctx = ExtractionContext::new();
        let mut warnings = Vec::new();

        for extractor in &self.extractors {
            let name = extractor.name();
            tracing::debug!(extractor = name, "Running extractor");

            let outcome = extractor.extract(doc, &mut ctx);
            for issue in ctx.take_issues() {
                tracing::warn!(extractor = name, error = %issue, "Skipped record");
                warnings.push(ExtractionWarning {
                    extractor: name.to_string(),
                    message: issue.to_string(),
                });
            }

            match outcome {
                Ok(()) => {}
                Err(Error::MissingBlock(block)) => {
                    tracing::debug!(extractor = name, block, "Block not present, skipping");
                    warnings.push(ExtractionWarning {
                        extractor: name.to_string(),
                        message: Error::MissingBlock(block).to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(extractor = name, error = %e, "Extractor failed");
                    warnings.push(ExtractionWarning {
                        extractor: name.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            blocks = doc.len(),
            warnings = warnings.len(),
            "Extraction complete"
        );

        ExtractionReport {
            result: ctx.into_aggregate(),
            warnings,
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the default pipeline
pub fn extract(doc: &InpDocument) -> ExtractionReport {
    ExtractionPipeline::new().run(doc)
}

/// Decode and extract one file's content
pub fn process_content(content: &str) -> Result<ExtractionReport> {
    let doc = InpDocument::parse(content)?;
    Ok(extract(&doc))
}

/// Decode and extract one file given as lines
pub fn process_lines<S: AsRef<str>>(lines: &[S]) -> Result<ExtractionReport> {
    let raw: Vec<RawLine> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| RawLine::new(i + 1, line.as_ref().trim_end_matches('\r')))
        .collect();
    let doc = InpDocument::from_lines(&raw)?;
    Ok(extract(&doc))
}

/// Process many files in parallel, one independent result per file
pub fn process_batch(files: &[Vec<String>]) -> Vec<Result<ExtractionReport>> {
    tracing::info!(files = files.len(), "Starting batch extraction");

    let pipeline = ExtractionPipeline::new();
    files
        .par_iter()
        .map(|lines| {
            let raw: Vec<RawLine> = lines
                .iter()
                .enumerate()
                .map(|(i, line)| RawLine::new(i + 1, line.trim_end_matches('\r')))
                .collect();
            let doc = InpDocument::from_lines(&raw)?;
            Ok(pipeline.run(&doc))
        })
        .collect()
}

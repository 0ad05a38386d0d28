//! Parallel parsing of identifier batches.

use std::collections::BTreeMap;

use radar_common::{ProductDescriptor, SourceFormat};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ParseError, Result};
use crate::formats::parse_identifier;

/// A raw identifier tagged with the grammar to parse it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIdentifier {
    pub raw: String,
    pub source: SourceFormat,
}

impl RawIdentifier {
    pub fn new(raw: impl Into<String>, source: SourceFormat) -> Self {
        Self {
            raw: raw.into(),
            source,
        }
    }
}

/// Parse every identifier. Output order matches input order, one outcome each.
pub fn parse_batch(items: &[RawIdentifier]) -> Vec<Result<ProductDescriptor>> {
    items
        .par_iter()
        .map(|item| parse_identifier(&item.raw, item.source))
        .collect()
}

/// Counts over a batch of parse outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub parsed: usize,
    pub failed: usize,
    pub failures_by_kind: BTreeMap<&'static str, usize>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[Result<ProductDescriptor>]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome {
                Ok(_) => summary.parsed += 1,
                Err(err) => summary.record_failure(err),
            }
        }

        summary
    }

    fn record_failure(&mut self, err: &ParseError) {
        debug!(raw = %err.raw, format = %err.format, reason = %err.reason, "Skipping identifier");
        self.failed += 1;
        *self.failures_by_kind.entry(err.reason.kind()).or_insert(0) += 1;
    }

    /// Emit the summary as a single log line.
    pub fn log(&self) {
        info!(
            total = self.total,
            parsed = self.parsed,
            failed = self.failed,
            failures = ?self.failures_by_kind,
            "Parsed identifier batch"
        );
    }
}

/// Split outcomes into descriptors and errors, keeping relative order.
pub fn partition_outcomes(
    outcomes: Vec<Result<ProductDescriptor>>,
) -> (Vec<ProductDescriptor>, Vec<ParseError>) {
    let mut parsed = Vec::with_capacity(outcomes.len());
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(descriptor) => parsed.push(descriptor),
            Err(err) => failed.push(err),
        }
    }
    (parsed, failed)
}

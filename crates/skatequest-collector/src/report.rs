//! Run and per-region reports.

use serde::Serialize;
use skatequest_core::ParkRecord;

/// How a single region query ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionOutcome {
    /// The query succeeded and produced this many records.
    Succeeded {
        /// Number of records emitted for the region.
        records: usize,
    },
    /// The query failed; the region contributed no records.
    Failed {
        /// Error text reported for the region.
        error: String,
    },
}

/// Outcome of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionReport {
    /// Region name as queried.
    pub region: String,
    /// How the query ended.
    #[serde(flatten)]
    pub outcome: RegionOutcome,
}

impl RegionReport {
    /// Creates a report for a successful region.
    pub fn succeeded(region: impl Into<String>, records: usize) -> Self {
        Self {
            region: region.into(),
            outcome: RegionOutcome::Succeeded { records },
        }
    }

    /// Creates a report for a failed region.
    pub fn failed(region: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            outcome: RegionOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Returns true if the region query succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RegionOutcome::Succeeded { .. })
    }

    /// Number of records the region contributed.
    pub fn record_count(&self) -> usize {
        match self.outcome {
            RegionOutcome::Succeeded { records } => records,
            RegionOutcome::Failed { .. } => 0,
        }
    }

    /// Error text, if the region failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RegionOutcome::Succeeded { .. } => None,
            RegionOutcome::Failed { error } => Some(error),
        }
    }
}

/// Everything a run produced: the records in collection order plus one
/// report per region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionReport {
    /// Records from all successful regions, in region order.
    pub records: Vec<ParkRecord>,
    /// Per-region outcomes, in region order.
    pub regions: Vec<RegionReport>,
}

impl CollectionReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the result of one region.
    #[must_use]
    pub fn with_region(mut self, records: Vec<ParkRecord>, report: RegionReport) -> Self {
        self.records.extend(records);
        self.regions.push(report);
        self
    }

    /// Total number of records collected.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Regions whose query succeeded.
    pub fn succeeded_regions(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions.iter().filter(|report| report.is_success())
    }

    /// Regions whose query failed.
    pub fn failed_regions(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions.iter().filter(|report| !report.is_success())
    }
}

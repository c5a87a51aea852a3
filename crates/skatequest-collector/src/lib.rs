#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod collector;
mod config;
mod output;
mod record;
pub mod regions;
mod report;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;

pub use skatequest_core::{Error, ErrorKind, ParkRecord, Result};

pub use crate::collector::Collector;
pub use crate::config::{CollectorConfig, DEFAULT_OUTPUT_PATH, DEFAULT_REQUEST_DELAY_MS};
#[cfg(any(test, feature = "test-utils"))]
pub use crate::mock::MockProvider;
pub use crate::output::write_records;
pub use crate::record::park_record;
pub use crate::report::{CollectionReport, RegionOutcome, RegionReport};

/// Tracing target for the collection loop.
pub const TRACING_TARGET: &str = "skatequest_collector::collector";

/// Tracing target for output writing.
pub const TRACING_TARGET_OUTPUT: &str = "skatequest_collector::output";

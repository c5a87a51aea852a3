//! Reqwest client module.
//!
//! This module provides the HTTP transport for Overpass queries.

mod client;
mod config;

pub use client::OverpassClient;
pub use config::{DEFAULT_ENDPOINT, OverpassConfig};

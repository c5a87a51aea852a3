//! Record types produced by the collector.

mod coordinates;
mod park_record;

pub use coordinates::Coordinates;
pub use park_record::ParkRecord;

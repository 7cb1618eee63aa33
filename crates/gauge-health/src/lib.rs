//! # gauge-health
//!
//! Liveness of Gauge's external dependencies, checked in parallel.
//!
//! Every service gets one [`HealthProbe`]. [`HealthAggregator::check_all`]
//! runs them concurrently with a per-probe timeout and collects a
//! [`HealthReport`] mapping each service name to `true` or `false`. A probe
//! never propagates an error: unconfigured, unreachable, slow and panicking
//! probes all show up as `false`.
//!
//! Standard services: `primary_inference`, `secondary_inference`,
//! `document_store`, `object_store`, `cache`, `secret_store`.

mod aggregator;
pub mod error;
mod probe;
pub mod probes;
mod report;

pub use aggregator::HealthAggregator;
pub use error::ProbeFailure;
pub use probe::{DisabledProbe, HealthProbe};
pub use report::HealthReport;

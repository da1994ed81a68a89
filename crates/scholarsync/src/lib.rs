//! Scholarship matching for ScholarSync.
//!
//! The [`matching`] module is the pure scoring core. Everything else is the
//! plumbing that feeds it profiles and scholarships and serves its results.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod profile;
pub mod recommendations;
pub mod telemetry;

//! Shared test utilities for the ecogen crates.
//!
//! [`recording`] captures `tracing` spans and events so suites can assert on
//! instrumentation; [`ci`] reads the environment-driven property-test profile.

pub mod ci;
pub mod recording;

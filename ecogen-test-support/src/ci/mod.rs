//! Environment-driven knobs for CI runs.

pub mod property_test_profile;

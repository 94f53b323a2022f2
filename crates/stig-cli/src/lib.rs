//! CLI library components for the STIG level reference generator.

pub mod logging;

//! The tools module provides several helper functions for huffzip.
//!
//! The tools are:
//! - cli: Command line interface and run options.
//! - freq_count: Frequency count of the input bytes, the first of the two passes.
//! - report: Text dumps of the frequency table, codes and tree for the user.
//!
pub mod cli;
pub mod freq_count;
pub mod report;

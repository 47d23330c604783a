//! Plain-text rendering of the shell's results.

pub mod report;

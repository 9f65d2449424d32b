//! End-to-end tests for the `timereport` binary.

mod cli;

//! Tests for the CLI module
//!
//! Argument parsing for both binaries and how parsed values merge with the
//! configuration file.

//! Test modules for the bounded queue
//!
//! Tests are organized by functional area for better maintainability.

mod edge_cases;

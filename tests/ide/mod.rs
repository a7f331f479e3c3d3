//! IDE layer tests
//!
//! Tests for the document host and hover queries:
//! - Document lifecycle and memoization
//! - Cross-document includes
//! - Quick info over realistic shaders

pub mod tests_analysis_host;
pub mod tests_quick_info;

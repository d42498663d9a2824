//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Random short code candidates
//! - [`url_normalizer`] - URL validation and normalization

pub mod code_generator;
pub mod url_normalizer;

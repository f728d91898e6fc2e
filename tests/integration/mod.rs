//! Integration Tests Module
//!
//! End-to-end tests of content generation over fake model and search
//! backends: model substitution, the fallback pipeline and the content
//! entry point.

// Shared fake backends
mod support;

// Model chain substitution tests
mod model_chain_test;

// Content service and agent crew tests
mod content_test;

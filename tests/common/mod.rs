//! Common test utilities for integration tests.
//!
//! # Modules
//!
//! - `logger`: Structured test logging infrastructure
//!
//! Sample URLs, payloads and temp directories come from `figjson::test_utils`.

pub mod logger;

//! Integration tests for facefx crates.
//!
//! End-to-end frame pipelines that cross `facefx-core` and `facefx-ops`:
//! host bytes in, effect chain, host bytes out.

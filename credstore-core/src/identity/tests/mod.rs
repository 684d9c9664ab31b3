//! Identity test suite
//!
//! End-to-end behavior across the store, cache and decoder.


// Test fixtures
pub mod helpers;

//! Integration tests against a running server + database + Redis.
//!
//! Run with: cargo test -- --ignored

mod aggregator_tests;
mod api_tests;

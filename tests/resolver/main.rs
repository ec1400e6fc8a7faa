//! Resolver Integration Tests
//!
//! End-to-end tests for the resolver over in-memory collaborators:
//! scenarios, effective dating, error propagation, concurrency and
//! property tests.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod effective_dating;

//! Integration tests for the BME680 exporter.
//!
//! These tests drive a scripted sensor through the poll loop and verify what
//! the scrape endpoint serves afterwards.

#[path = "integration_tests/common/mod.rs"]
mod common;

#[path = "integration_tests/health_tests.rs"]
mod health_tests;

#[path = "integration_tests/poll_tests.rs"]
mod poll_tests;

#[path = "integration_tests/scrape_tests.rs"]
mod scrape_tests;

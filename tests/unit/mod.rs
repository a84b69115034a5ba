//! Integration tests for the public API.

mod estimator_tests;
mod index_tests;
mod pricing_tests;
mod property_tests;

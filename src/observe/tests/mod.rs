//! Observation context tests.

mod controller_tests;
mod extract_tests;

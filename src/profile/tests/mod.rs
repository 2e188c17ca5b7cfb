//! Unit tests for the profile module.

mod domain_tests;

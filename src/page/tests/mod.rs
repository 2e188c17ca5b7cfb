//! Unit tests for the page module.

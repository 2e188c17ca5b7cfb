//! Unit tests for the turn module.

mod state_tests;

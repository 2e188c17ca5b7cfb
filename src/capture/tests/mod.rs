//! Capture context tests.

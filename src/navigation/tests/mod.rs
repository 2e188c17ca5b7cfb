//! Navigation context tests.

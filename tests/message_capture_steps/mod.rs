//! Step definitions for conversation capture BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;

//! Test fixtures for depot-tour.
//!
//! Provides a small hand-placed map of holds and their towns, plus helpers
//! to build locations and countries from it.

pub mod holds;

pub use holds::*;

//! Deterministic adapters for tests and scripted curation.

pub mod clock;

pub use clock::FixedClock;

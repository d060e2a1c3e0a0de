//! Port traits for the few outside resources curation touches.
//!
//! The core only needs the current time, to stamp status changes. The
//! command layer additionally reads and writes curation documents.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;

pub use clock::Clock;
pub use filesystem::FileSystem;

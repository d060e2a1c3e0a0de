//! Service context bundling the port trait objects used by commands.

use crate::adapters::live::{LiveClock, LiveFileSystem};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;

/// Bundles the ports a command may need.
///
/// Constructors wire up different adapter implementations; tests swap in
/// a fixed clock or an in-memory filesystem.
pub struct ServiceContext {
    /// Clock for stamping status changes.
    pub clock: Box<dyn Clock>,
    /// Filesystem for loading and saving documents.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context backed by the system clock and disk.
    #[must_use]
    pub fn live() -> Self {
        Self { clock: Box::new(LiveClock), fs: Box::new(LiveFileSystem) }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn with(clock: Box<dyn Clock>, fs: Box<dyn FileSystem>) -> Self {
        Self { clock, fs }
    }
}

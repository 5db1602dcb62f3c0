//! Data connector module for synced user profiles.
//!
//! Supported backends:
//! - Memory (default)
//! - None (no-op)

pub mod config;
mod core;
mod factory;
mod memory;
mod noop;

pub use core::{
    NewProfile, ProfileId, ProfileResult, ProfileStorage, ProfileStorageError, StoredProfile,
};

pub use config::ProfileBackend;
pub use factory::create_profile_storage;
// Re-export implementations for testing
pub use memory::MemoryProfileStorage;
pub use noop::NoOpProfileStorage;

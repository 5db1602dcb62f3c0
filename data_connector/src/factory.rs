use std::sync::Arc;

use tracing::info;

use crate::{
    config::ProfileBackend, core::ProfileStorage, memory::MemoryProfileStorage,
    noop::NoOpProfileStorage,
};

/// Create the profile storage backend selected by configuration.
pub fn create_profile_storage(backend: ProfileBackend) -> Arc<dyn ProfileStorage> {
    match backend {
        ProfileBackend::Memory => {
            info!("Initializing in-memory profile storage");
            Arc::new(MemoryProfileStorage::new())
        }
        ProfileBackend::None => {
            info!("Profile persistence disabled (no-op storage)");
            Arc::new(NoOpProfileStorage::new())
        }
    }
}

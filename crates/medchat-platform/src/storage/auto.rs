//! Backend selection.
//!
//! Priority for `Auto`: localStorage → Memory (fallback)

use std::rc::Rc;
use medchat_core::ports::StoragePort;
use medchat_types::config::StorageBackendType;
use super::{LocalStorage, MemoryStorage};

/// Open the backend named in the config.
/// Returns a trait object so callers are backend-agnostic.
pub fn open_storage(backend: &StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Auto => auto_detect_storage(),
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::LocalStorage => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Rc::new(local)
            }
            Err(e) => {
                log::error!("localStorage requested but unavailable ({}), history will not survive a reload", e);
                Rc::new(MemoryStorage::new())
            }
        },
    }
}

/// Try to open the best available storage backend.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    match LocalStorage::open() {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}

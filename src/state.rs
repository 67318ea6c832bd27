//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::StorageBackend;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since services hold their repositories behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Backend the repositories were built for, reported by `/health`
    pub storage: StorageBackend,
}

impl AppState {
    /// Builds services over `repos`.
    ///
    /// # Example
    /// ```ignore
    /// let state = AppState::new(Repositories::in_memory(), StorageBackend::Memory);
    /// ```
    pub fn new(repos: Repositories, storage: StorageBackend) -> Self {
        Self {
            services: Services::new(repos),
            storage,
        }
    }
}

//! Service layer for business logic operations.
//!
//! Services sit between the HTTP handlers and the repository port. They add
//! logging and timing around each store call and never change what the
//! store returned.

mod instrumented;
mod user_service;

pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since repositories are held behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users),
        }
    }
}

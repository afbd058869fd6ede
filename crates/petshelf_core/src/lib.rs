//! Core data-access layer for the pet catalog.
//! This crate is the single source of truth for routing, validation and
//! change-notification invariants.

pub mod db;
pub mod locator;
pub mod logging;
pub mod model;
pub mod notify;
pub mod provider;
pub mod store;

pub use locator::{Locator, LocatorKind, LocatorMatcher, PETS_PATH};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::pet::{Gender, Pet, PetValidationError, PetValues};
pub use notify::{ChangeNotifier, ChangeObserver};
pub use provider::{
    PetColumn, PetProvider, PetQuery, PetRow, PetSort, ProviderError, ProviderResult, RowFilter,
};
pub use store::PetStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

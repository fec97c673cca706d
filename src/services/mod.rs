//! Catalog services.
//!
//! These contain the core business logic. The boundary layer (HTTP routing,
//! request validation, auth token handling) composes them; it is not part of
//! this crate.

pub mod catalog;
pub use catalog::{CatalogMutationService, CatalogQueryService};

pub mod units;
pub use units::UnitService;

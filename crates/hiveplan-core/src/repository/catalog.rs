//! Catalog provider trait definition.

use hiveplan_types::bee::Bee;
use hiveplan_types::beequip::Beequip;
use hiveplan_types::error::CatalogError;

/// Read-only source of bee and beequip definitions.
///
/// Called once when a session loads; the lists are treated as immutable
/// afterwards.
pub trait CatalogProvider: Send + Sync {
    fn list_bees(&self) -> impl std::future::Future<Output = Result<Vec<Bee>, CatalogError>> + Send;

    fn list_beequips(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Beequip>, CatalogError>> + Send;
}

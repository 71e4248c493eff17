//! Feed registry.
//!
//! Static access to every feed descriptor, initialized on first use.

use engdocs_core::Schema;
use std::sync::OnceLock;

use crate::descriptor::FeedDescriptor;
use crate::dtr::{bdi_descriptor, techrep_descriptor};
use crate::gtp::gtp_descriptor;
use crate::sar::sar_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all feed descriptors.
static DESCRIPTORS: OnceLock<Vec<FeedDescriptor>> = OnceLock::new();

/// Initializes all feed descriptors, in collection order.
fn init_descriptors() -> Vec<FeedDescriptor> {
    vec![
        gtp_descriptor(),
        // DTR: BDI first, then technical reports
        bdi_descriptor(),
        techrep_descriptor(),
        sar_descriptor(),
    ]
}

// ============================================================================
// Feed Registry
// ============================================================================

/// Global registry of all feed descriptors.
pub struct FeedRegistry;

impl FeedRegistry {
    /// Returns all feed descriptors.
    pub fn all() -> &'static [FeedDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Feeds collected for `schema`, in collection order.
    pub fn for_schema(schema: Schema) -> Vec<&'static FeedDescriptor> {
        Self::all().iter().filter(|d| d.schema == schema).collect()
    }

    /// Whether any feed of `schema` is only served by Production.
    pub fn production_only(schema: Schema) -> bool {
        Self::all()
            .iter()
            .any(|d| d.schema == schema && d.production_only)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use engdocs_core::FeedKind;

    fn ids(schema: Schema) -> Vec<FeedKind> {
        FeedRegistry::for_schema(schema).iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_registry_has_every_kind() {
        let kinds: Vec<_> = FeedRegistry::all().iter().map(|d| d.id).collect();
        assert_eq!(
            kinds,
            vec![FeedKind::Gtp, FeedKind::Bdi, FeedKind::TechRep, FeedKind::Sar]
        );
    }

    #[test]
    fn test_schema_feeds() {
        assert_eq!(ids(Schema::Gtp), vec![FeedKind::Gtp]);
        assert_eq!(ids(Schema::Dtr), vec![FeedKind::Bdi, FeedKind::TechRep]);
        assert_eq!(ids(Schema::Sar), vec![FeedKind::Sar]);
        for schema in [Schema::Gtp, Schema::Dtr, Schema::Sar] {
            assert!(FeedRegistry::for_schema(schema).iter().all(|d| d.schema == schema));
        }
    }

    #[test]
    fn test_production_only() {
        assert!(FeedRegistry::production_only(Schema::Sar));
        assert!(!FeedRegistry::production_only(Schema::Gtp));
        assert!(!FeedRegistry::production_only(Schema::Dtr));
    }

    #[test]
    fn test_methods() {
        let methods: Vec<_> = FeedRegistry::all().iter().map(|d| d.endpoint.method).collect();
        assert_eq!(methods, vec!["getGTPs", "getBDIDocs", "getTechRepDocs", "getSarList"]);
    }
}

//! Ground test proposals.

use engdocs_core::{FeedKind, Schema};
use engdocs_fetch::DOCUMENT_ENVELOPE_KEYS;

use crate::descriptor::{Endpoint, FeedDescriptor};

/// Descriptor of the GTP feed.
pub fn gtp_descriptor() -> FeedDescriptor {
    FeedDescriptor {
        id: FeedKind::Gtp,
        endpoint: Endpoint::gtp("getGTPs"),
        envelope_keys: DOCUMENT_ENVELOPE_KEYS,
        schema: Schema::Gtp,
        production_only: false,
    }
}

//! Technical documents: BDI documents and technical reports.
//!
//! Both feeds share the DTR schema; their tables are concatenated and then
//! finished dates are merged (see [`merge_finished_dates`]).

mod merge;

use engdocs_core::{FeedKind, Schema};
use engdocs_fetch::DOCUMENT_ENVELOPE_KEYS;

use crate::descriptor::{Endpoint, FeedDescriptor};

pub use merge::{merge_finished_dates, FINISHED_DATE_COLUMN, GRTP_FINISHED_DATE_COLUMN};

/// Descriptor of the BDI documents feed.
pub fn bdi_descriptor() -> FeedDescriptor {
    FeedDescriptor {
        id: FeedKind::Bdi,
        endpoint: Endpoint::gtp("getBDIDocs"),
        envelope_keys: DOCUMENT_ENVELOPE_KEYS,
        schema: Schema::Dtr,
        production_only: false,
    }
}

/// Descriptor of the technical reports feed.
pub fn techrep_descriptor() -> FeedDescriptor {
    FeedDescriptor {
        id: FeedKind::TechRep,
        endpoint: Endpoint::gtp("getTechRepDocs"),
        envelope_keys: DOCUMENT_ENVELOPE_KEYS,
        schema: Schema::Dtr,
        production_only: false,
    }
}

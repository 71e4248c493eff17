//! Safety analysis reports.
//!
//! Served by the `sar` service of the Production environment only. Rows
//! carry ColdFusion timestamps that are rewritten by [`repair_dates`].

mod dates;

use engdocs_core::{FeedKind, Schema};
use engdocs_fetch::SAR_ENVELOPE_KEYS;

use crate::descriptor::{Endpoint, FeedDescriptor};

pub use dates::{repair_date, repair_dates, ESTIMATED_DATE_COLUMN};

/// Descriptor of the SAR feed.
pub fn sar_descriptor() -> FeedDescriptor {
    FeedDescriptor {
        id: FeedKind::Sar,
        endpoint: Endpoint {
            service: "sar",
            script: "sarAPI.cfc",
            method: "getSarList",
        },
        envelope_keys: SAR_ENVELOPE_KEYS,
        schema: Schema::Sar,
        production_only: true,
    }
}

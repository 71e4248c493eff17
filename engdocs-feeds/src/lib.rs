// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `engdocs` Feeds
//!
//! Feed-specific configuration and post-processing.
//!
//! | Feed | Service | Method | Schema | Post-processing |
//! |------|---------|--------|--------|-----------------|
//! | GTP | `gtp` | `getGTPs` | GTP | - |
//! | BDI | `gtp` | `getBDIDocs` | DTR | finished-date merge |
//! | TechRep | `gtp` | `getTechRepDocs` | DTR | finished-date merge |
//! | SAR | `sar` | `getSarList` | SAR | date repair |
//!
//! ## Usage
//!
//! ```ignore
//! use engdocs_feeds::FeedRegistry;
//! use engdocs_core::Schema;
//!
//! let desc = FeedRegistry::for_schema(Schema::Gtp)[0];
//! let query = desc.query(base_url, api_key, "2010/01/01", "2026/01/19");
//! let (table, summary) = engdocs_fetch::collect(&client, &query, &programs, settings, &dump).await;
//! ```

pub mod descriptor;
pub mod registry;

// Feed modules
pub mod dtr;
pub mod gtp;
pub mod sar;

// Re-export key types
pub use descriptor::{date_filter, Endpoint, FeedDescriptor, GTP_SERVICE};
pub use registry::FeedRegistry;

// Re-export feed descriptors and post-processing
pub use dtr::{bdi_descriptor, merge_finished_dates, techrep_descriptor};
pub use gtp::gtp_descriptor;
pub use sar::{repair_dates, sar_descriptor};

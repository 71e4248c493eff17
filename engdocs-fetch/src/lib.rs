// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `engdocs` Fetch
//!
//! The retrieval engine: everything between a URL and a [`ResultTable`].
//!
//! ## Pipeline
//!
//! - [`client::HttpClient`] - One logical GET with bounded retry, capped
//!   backoff and jittered timeouts
//! - [`decode::decode`] - JSON parse with a single control-character repair
//! - [`shape::extract`] - Locates records in payloads of unknown shape
//! - [`programs::list_programs`] - Fetches the program catalogue (fatal on failure)
//! - [`collector::Collector`] - Walks programs and pages into one table
//!
//! ## Support
//!
//! - [`source::PageSource`] - The fetch seam; the collector never talks to
//!   the network directly
//! - [`probe::Probe`] - Two-stage connectivity check
//! - [`dump::DebugDump`] - Per-page diagnostic files
//!
//! ## Example
//!
//! ```ignore
//! use engdocs_fetch::{collect, list_programs, DebugDump, FetchSettings, HttpClient};
//!
//! let client = HttpClient::new()?;
//! let settings = FetchSettings::default();
//! let dump = DebugDump::disabled();
//!
//! let programs = list_programs(&client, base_url, api_key, &settings, &dump).await?;
//! let (table, summary) = collect(&client, &query, &programs, settings, &dump).await;
//! ```
//!
//! [`ResultTable`]: engdocs_core::ResultTable

pub mod client;
pub mod collector;
pub mod decode;
pub mod dump;
pub mod error;
pub mod probe;
pub mod programs;
pub mod retry;
pub mod shape;
pub mod source;

#[cfg(test)]
mod testing;

// Errors
pub use error::{FailureKind, FetchError};

// Fetching
pub use client::{HttpClient, RawResponse};
pub use retry::{RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use source::{FetchSettings, PageSource};

// Decoding and extraction
pub use decode::{decode, is_falsy, strip_control_chars};
pub use shape::{extract, ExtractPath, Extraction, DOCUMENT_ENVELOPE_KEYS, SAR_ENVELOPE_KEYS};

// Collection
pub use collector::{collect, Collector, FeedQuery, PAGE_SIZE};
pub use programs::{list_programs, program_list_url};

// Diagnostics
pub use dump::{DebugDump, DEFAULT_DEBUG_DIR};
pub use probe::{Probe, ProbeResult, ProbeStage};

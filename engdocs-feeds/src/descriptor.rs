//! Feed descriptor system.
//!
//! A descriptor holds the static configuration of one feed: where it lives,
//! how its pages are wrapped and which schema its rows belong to.

use engdocs_core::{FeedKind, Schema};
use engdocs_fetch::FeedQuery;

/// Service path segment every base URL ends with.
pub const GTP_SERVICE: &str = "gtp";

// ============================================================================
// Feed Descriptor
// ============================================================================

/// Complete descriptor for a feed.
#[derive(Debug, Clone)]
pub struct FeedDescriptor {
    /// Feed identifier.
    pub id: FeedKind,
    /// Endpoint location.
    pub endpoint: Endpoint,
    /// Envelope keys in priority order.
    pub envelope_keys: &'static [&'static str],
    /// Schema of the system this feed belongs to.
    pub schema: Schema,
    /// Whether the feed is only served by the Production environment.
    pub production_only: bool,
}

impl FeedDescriptor {
    /// Label used in logs and debug directories.
    pub fn data_type(&self) -> &'static str {
        self.id.data_type()
    }

    /// Base URL of this feed's service.
    ///
    /// Feeds outside the `gtp` service swap the trailing path segment.
    pub fn service_url(&self, base_url: &str) -> String {
        if self.endpoint.service == GTP_SERVICE {
            return base_url.to_string();
        }
        let from = format!("/{GTP_SERVICE}");
        let to = format!("/{}", self.endpoint.service);
        match base_url.strip_suffix(&from) {
            Some(root) => format!("{root}{to}"),
            None => base_url.replace(&from, &to),
        }
    }

    /// URL up to and including the `"programID":"` prefix of the filter.
    pub fn url_base(&self, base_url: &str, api_key: &str) -> String {
        format!(
            "{}/{}?method={}&key={}&filter={{\"programID\":\"",
            self.service_url(base_url),
            self.endpoint.script,
            self.endpoint.method,
            api_key
        )
    }

    /// Builds the collector query for this feed.
    pub fn query(&self, base_url: &str, api_key: &str, date_ini: &str, date_end: &str) -> FeedQuery {
        FeedQuery {
            data_type: self.data_type().to_string(),
            url_base: self.url_base(base_url, api_key),
            date_filter: date_filter(date_ini, date_end),
            envelope_keys: self.envelope_keys,
        }
    }
}

/// Filter suffix following the program ID.
pub fn date_filter(date_ini: &str, date_end: &str) -> String {
    format!("\",\"dateini\":\"{date_ini}\",\"dateEnd\":\"{date_end}\"}}")
}

// ============================================================================
// Endpoint
// ============================================================================

/// Where a feed is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Service path segment (`gtp`, `sar`).
    pub service: &'static str,
    /// ColdFusion component.
    pub script: &'static str,
    /// API method.
    pub method: &'static str,
}

impl Endpoint {
    /// An endpoint of the `gtp` service.
    pub const fn gtp(method: &'static str) -> Self {
        Self {
            service: GTP_SERVICE,
            script: "groundTestProposalAPI.cfc",
            method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engdocs_fetch::SAR_ENVELOPE_KEYS;

    fn sar() -> FeedDescriptor {
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

    #[test]
    fn test_service_url_swap() {
        let desc = sar();
        assert_eq!(
            desc.service_url("https://ft.example.com/components/systemTest/gtp"),
            "https://ft.example.com/components/systemTest/sar"
        );
        assert_eq!(desc.service_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_date_filter() {
        assert_eq!(
            date_filter("2010/01/01", "2026/01/19"),
            r#"","dateini":"2010/01/01","dateEnd":"2026/01/19"}"#
        );
    }

    #[test]
    fn test_query_assembles_full_url() {
        let query = sar().query("https://h/gtp", "K", "2010/01/01", "2020/12/31");
        assert_eq!(query.data_type, "SAR");
        assert_eq!(
            query.page_url("77", 1),
            r#"https://h/sar/sarAPI.cfc?method=getSarList&key=K&filter={"programID":"77","dateini":"2010/01/01","dateEnd":"2020/12/31"}&page=1"#
        );
    }
}

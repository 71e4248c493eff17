//! Feed, schema and environment kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Feed Kind
// ============================================================================

/// One paginated document endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Ground test proposals.
    Gtp,
    /// BDI documents.
    Bdi,
    /// Technical reports.
    TechRep,
    /// Safety analysis reports.
    Sar,
}

impl FeedKind {
    /// Label used in logs and debug directories.
    pub fn data_type(&self) -> &'static str {
        match self {
            Self::Gtp => "GTP",
            Self::Bdi => "BDI",
            Self::TechRep => "TechRep",
            Self::Sar => "SAR",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_type())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Standard column order for the DTR system.
const DTR_COLUMNS: &[&str] = &[
    "program",
    "gtpNumber",
    "gtpRevision",
    "gtpTitle",
    "gtpStatus",
    "technology",
    "gtpIssuedDate",
    "gtpApprovalDate",
    "gtpSubmittalDate",
    "gtpFinishedDate",
    "dtrRequiredDate",
    "gtpApprovedAgreedDate",
    "gtpAgreedDateInDiscussion",
    "testVehicle",
    "category",
    "pep",
    "MHPlannedTest",
    "testOwner",
    "testResponsible",
    "supervisor",
    "docType",
    "docNumber",
    "docRevision",
    "docTitle",
    "docStatus",
    "docSubmittalDate",
    "docSubmitalToApprovalDate",
    "docApprovalDate",
    "docAuthor",
    "docNextApprover",
    "docApprovers",
    "MH",
    "duracao",
    "dtrStatus",
    "errorMsg",
];

/// Standard column order for the GTP system.
const GTP_COLUMNS: &[&str] = &[
    "program",
    "gtpNumber",
    "gtpRevision",
    "gtpTitle",
    "technology",
    "gtpStatus",
    "issueDate",
    "approvalDate",
    "submittalDate",
    "finishedDate",
    "agreedDate",
    "supervisor",
    "testVehicle",
    "responsible",
    "dtrStatus",
    "dtrCount",
    "dtrQuantity",
    "errorMsg",
];

/// The system a run produces; selects column order and validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// BDI documents and technical reports.
    Dtr,
    /// Ground test proposals.
    Gtp,
    /// Safety analysis reports.
    Sar,
}

impl Schema {
    /// Label stored in the workbook and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dtr => "DTR",
            Self::Gtp => "GTP",
            Self::Sar => "SAR",
        }
    }

    /// Fixed column order. Empty for SAR, whose columns pass through as-is.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Dtr => DTR_COLUMNS,
            Self::Gtp => GTP_COLUMNS,
            Self::Sar => &[],
        }
    }

    /// Date column that must be filled once a DTR is submitted or approved.
    pub fn submittal_date_column(&self) -> Option<&'static str> {
        match self {
            Self::Dtr => Some("gtpSubmittalDate"),
            Self::Gtp => Some("submittalDate"),
            Self::Sar => None,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Upstream deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Quality assurance system.
    #[serde(rename = "QAS")]
    Qas,
    /// Production system.
    Production,
}

impl Environment {
    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Qas => "QAS",
            Self::Production => "Production",
        }
    }
}

/// Default per-request timeout in seconds (`API_TIMEOUT`).
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Default total number of attempts per request (`MAX_RETRIES`).
pub const DEFAULT_MAX_RETRIES: u32 = 5;

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Error taxonomy (spec §7).
//!
//! Admission-time rejection and runtime no-data are *not* represented as
//! `Result`s here: the public contracts for C3 (`is_action_supported`) and
//! C2 (`get_meas_data`) return `bool`, matching the spec's "pure
//! bool-returning predicate" / "never throws" requirements. These enums
//! exist so the internal sub-checks can be logged with a specific reason
//! without changing those public contracts.

use thiserror::Error;

/// Why an action definition (or one of its sub-checks) failed admission.
/// Never surfaced to the RIC directly — logged at `debug` and folded into
/// the `bool` returned by `is_action_supported`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("payload does not tag as an E2SM-KPM service model")]
    NotKpmServiceModel,

    #[error("granularity period must be strictly positive")]
    NonPositiveGranularity,

    #[error("cell {0:?} is not supported by the measurement provider")]
    UnsupportedCell(crate::types::CellGlobalId),

    #[error("metric '{0}' carries a label other than NO_LABEL")]
    UnsupportedLabel(String),

    #[error("metric '{name}' is not supported at the required scope/cell-scope")]
    UnsupportedMetric { name: String },

    #[error("UE {0} is not supported by the measurement provider")]
    UnsupportedUe(crate::types::UeId),

    #[error("test condition is not supported by the measurement provider")]
    UnsupportedTestCondition,

    #[error("embedded style-1 subscription info failed admission")]
    EmbeddedSubscriptionRejected,
}

/// Startup-time consistency failures between the catalog (C1) and a
/// measurement provider (C2). Fatal: the host is expected to refuse to
/// start on `Err` (spec §7, "invariant violation").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(
        "metric '{name}' is supported by the provider but absent from the catalog"
    )]
    UnknownMetric { name: String },

    #[error(
        "metric '{name}': provider labels {provider_labels:#x} are not a subset of catalog labels {catalog_labels:#x}"
    )]
    LabelMismatch { name: String, provider_labels: u32, catalog_labels: u32 },

    #[error(
        "metric '{name}': provider scopes {provider_scopes:#x} are not a subset of catalog scopes {catalog_scopes:#x}"
    )]
    ScopeMismatch { name: String, provider_scopes: u32, catalog_scopes: u32 },

    #[error("metric '{name}' requires cell scope per the catalog but the provider does not permit it")]
    CellScopeMismatch { name: String },
}

/// E2SM-CCC pre-call validation failures (spec §7, "control failure"):
/// returned by `check_control_request_supported` before the configurator is
/// ever awaited. A configurator-reported failure is a distinct outcome —
/// it's folded into `ControlResponse { success: false, .. }` rather than
/// this enum, since every requested structure still needs an echoed
/// old/requested-values outcome (see `ccc::response`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("style {0} is not supported (only style 2 is)")]
    UnsupportedStyle(u8),

    #[error("message format {0} is not supported (only format 2 is)")]
    UnsupportedFormat(u8),

    #[error("cell global id is not an NR-CGI, or is zero")]
    InvalidCellGlobalId,

    #[error("config structure '{0}' is not known to any registered executor")]
    UnknownConfigStructure(String),

    #[error("O-RRMPolicyRatio has no policy members")]
    EmptyPolicyList,

    #[error("O-RRMPolicyRatio policy has no members")]
    EmptyMemberList,

    #[error("O-RRMPolicyRatio is missing a required ratio")]
    MissingRatio,
}

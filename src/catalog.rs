//! Metric catalog (spec §4.1): a static, read-only registry of what metrics
//! exist and what labels/scopes/cells are legal for each.
//!
//! Grounded in `e2sm_kpm_metric_defs.h` from the reference implementation:
//! the catalog there is a concatenation of a 3GPP TS 28.552 table and a
//! handful of O-RAN-defined additions, looked up by name. We keep the same
//! shape here — two static slices, merged at construction — rather than a
//! hierarchy.

use crate::types::{LabelMask, MeasObjMask, ScopeMask};
use std::collections::HashMap;

/// How a metric's value is produced at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionMethod {
    /// Cumulative Counter — monotonically increasing, reset only on restart.
    CumulativeCounter,
    /// Gauge — an instantaneous, replaced-not-appended sample.
    Gauge,
    /// Discrete Event Registration — derived once per qualifying event.
    DerivedPerEvent,
    /// Status Inspection — read on demand from current node state.
    StatusInspection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Real,
}

/// Immutable metric descriptor, keyed by name (spec §3 "Metric descriptor").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub meas_obj: MeasObjMask,
    pub collection_method: CollectionMethod,
    pub data_type: DataType,
    pub unit: &'static str,
    pub legal_labels: LabelMask,
    pub legal_scopes: ScopeMask,
}

impl MetricDescriptor {
    /// Cell scope is required iff the object class is confined to a single
    /// cell (cell-DU or cell-CU). Derived, never stored (spec §4.1).
    pub fn cell_scope_required(&self) -> bool {
        self.meas_obj.cell_scope_required()
    }
}

const fn m(
    name: &'static str,
    meas_obj: MeasObjMask,
    collection_method: CollectionMethod,
    data_type: DataType,
    unit: &'static str,
    legal_labels: LabelMask,
    legal_scopes: ScopeMask,
) -> MetricDescriptor {
    MetricDescriptor { name, meas_obj, collection_method, data_type, unit, legal_labels, legal_scopes }
}

/// Representative slice of the standardized 3GPP TS 28.552 / O-RAN.WG3.E2SM-KPM-R003
/// catalog. Not an exhaustive reproduction of the ~280-entry original table —
/// enough to exercise every measurement-object class, collection method and
/// label/scope combination the admission and aggregation logic branch on.
pub mod standardized {
    use super::*;
    use CollectionMethod::*;
    use DataType::*;

    pub const DRB_RLC_SDU_TRANSMITTED_VOLUME_DL: MetricDescriptor = m(
        "DRB.RlcSduTransmittedVolumeDL",
        MeasObjMask::NR_CELL_DU,
        CumulativeCounter,
        Integer,
        "kbit",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask::ALL,
    );

    pub const DRB_RLC_SDU_TRANSMITTED_VOLUME_UL: MetricDescriptor = m(
        "DRB.RlcSduTransmittedVolumeUL",
        MeasObjMask::NR_CELL_DU,
        CumulativeCounter,
        Integer,
        "kbit",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask::ALL,
    );

    pub const DRB_UE_THP_DL: MetricDescriptor = m(
        "DRB.UEThpDl",
        MeasObjMask::NR_CELL_DU,
        DerivedPerEvent,
        Real,
        "kbps",
        LabelMask(LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0 | LabelMask::PLMN_ID.0),
        ScopeMask::ALL,
    );

    pub const DRB_UE_THP_UL: MetricDescriptor = m(
        "DRB.UEThpUl",
        MeasObjMask::NR_CELL_DU,
        DerivedPerEvent,
        Real,
        "kbps",
        LabelMask(LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0 | LabelMask::PLMN_ID.0),
        ScopeMask::ALL,
    );

    pub const DRB_AIR_IF_DELAY_UL: MetricDescriptor = m(
        "DRB.AirIfDelayUl",
        MeasObjMask::NR_CELL_DU,
        DerivedPerEvent,
        Real,
        "ms",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask::ALL,
    );

    pub const DRB_RLC_DELAY_UL: MetricDescriptor = m(
        "DRB.RlcDelayUl",
        MeasObjMask::NR_CELL_DU,
        DerivedPerEvent,
        Real,
        "ms",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask::ALL,
    );

    pub const RRU_PRB_USED_DL: MetricDescriptor = m(
        "RRU.PrbUsedDl",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "-",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const RRU_PRB_AVAIL_DL: MetricDescriptor = m(
        "RRU.PrbAvailDl",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "-",
        LabelMask::NO_LABEL,
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const RRU_PRB_TOT_DL: MetricDescriptor = m(
        "RRU.PrbTotDl",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "%",
        LabelMask::NO_LABEL,
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const RRU_PRB_USED_UL: MetricDescriptor = m(
        "RRU.PrbUsedUl",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "-",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const RRU_PRB_AVAIL_UL: MetricDescriptor = m(
        "RRU.PrbAvailUl",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "-",
        LabelMask::NO_LABEL,
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const RRU_PRB_TOT_UL: MetricDescriptor = m(
        "RRU.PrbTotUl",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "%",
        LabelMask::NO_LABEL,
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const DRB_PACKET_LOSS_RATE_UU: MetricDescriptor = m(
        "DRB.PacketLossRateUu",
        MeasObjMask::NR_CELL_DU,
        CumulativeCounter,
        Integer,
        "-",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0),
    );

    pub const QOS_FLOW_PDCP_PDU_VOLUME_DL: MetricDescriptor = m(
        "QosFlow.PdcpPduVolumeDL",
        MeasObjMask(MeasObjMask::NR_CELL_CU.0 | MeasObjMask::GNB_CU_UP.0),
        CumulativeCounter,
        Integer,
        "kbit",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask::ALL,
    );

    pub const QOS_FLOW_PDCP_PDU_VOLUME_UL: MetricDescriptor = m(
        "QosFlow.PdcpPduVolumeUL",
        MeasObjMask(MeasObjMask::NR_CELL_CU.0 | MeasObjMask::GNB_CU_UP.0),
        CumulativeCounter,
        Integer,
        "kbit",
        LabelMask(LabelMask::PLMN_ID.0 | LabelMask::FIVE_QI.0 | LabelMask::SLICE_ID.0),
        ScopeMask::ALL,
    );

    pub const RACH_PREAMBLE_DED_CELL: MetricDescriptor = m(
        "RACH.PreambleDedCell",
        MeasObjMask::NR_CELL_DU,
        StatusInspection,
        Integer,
        "-",
        LabelMask::NO_LABEL,
        ScopeMask::NODE,
    );

    pub fn all() -> &'static [MetricDescriptor] {
        &[
            DRB_RLC_SDU_TRANSMITTED_VOLUME_DL,
            DRB_RLC_SDU_TRANSMITTED_VOLUME_UL,
            DRB_UE_THP_DL,
            DRB_UE_THP_UL,
            DRB_AIR_IF_DELAY_UL,
            DRB_RLC_DELAY_UL,
            RRU_PRB_USED_DL,
            RRU_PRB_AVAIL_DL,
            RRU_PRB_TOT_DL,
            RRU_PRB_USED_UL,
            RRU_PRB_AVAIL_UL,
            RRU_PRB_TOT_UL,
            DRB_PACKET_LOSS_RATE_UU,
            QOS_FLOW_PDCP_PDU_VOLUME_DL,
            QOS_FLOW_PDCP_PDU_VOLUME_UL,
            RACH_PREAMBLE_DED_CELL,
        ]
    }
}

/// Operator-defined additions, in the same record shape (spec §4.1: "the
/// catalog is a concatenation, not a hierarchy").
pub mod operator_defined {
    use super::*;
    use CollectionMethod::*;
    use DataType::*;

    pub const CELL_RESOURCE_BLOCK_UTILIZATION_RATIO: MetricDescriptor = m(
        "Operator.CellPrbUtilRatio",
        MeasObjMask::NR_CELL_DU,
        Gauge,
        Real,
        "-",
        LabelMask::NO_LABEL,
        ScopeMask::NODE,
    );

    pub fn all() -> &'static [MetricDescriptor] {
        &[CELL_RESOURCE_BLOCK_UTILIZATION_RATIO]
    }
}

/// Process-wide read-only table built at startup from the union of the
/// standardized and operator-defined tables (spec §9 "Global metric
/// catalog"). No dynamic registration.
pub struct MetricCatalog {
    by_name: HashMap<&'static str, &'static MetricDescriptor>,
}

impl MetricCatalog {
    /// Builds the catalog from the two static tables. There is no fallible
    /// path here: the tables are compiled-in and non-overlapping by
    /// construction, so this never fails.
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        for d in standardized::all().iter().chain(operator_defined::all().iter()) {
            by_name.insert(d.name, d);
        }
        Self { by_name }
    }

    /// Pure; total; no side effects (spec §4.1).
    pub fn lookup(&self, name: &str) -> Option<&MetricDescriptor> {
        self.by_name.get(name).copied()
    }

    /// Produces the full descriptor set.
    pub fn iterate(&self) -> impl Iterator<Item = &MetricDescriptor> {
        self.by_name.values().copied()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_standardized_and_operator_entries() {
        let cat = MetricCatalog::new();
        assert!(cat.lookup("DRB.RlcSduTransmittedVolumeDL").is_some());
        assert!(cat.lookup("Operator.CellPrbUtilRatio").is_some());
        assert!(cat.lookup("NoSuchMetric").is_none());
    }

    #[test]
    fn cell_scope_required_matches_meas_obj_class() {
        let cat = MetricCatalog::new();
        let prb = cat.lookup("RRU.PrbUsedDl").unwrap();
        assert!(prb.cell_scope_required());

        let qos = cat.lookup("QosFlow.PdcpPduVolumeDL").unwrap();
        assert!(!qos.cell_scope_required());
    }

    #[test]
    fn iterate_covers_every_table() {
        let cat = MetricCatalog::new();
        let count = cat.iterate().count();
        assert_eq!(count, standardized::all().len() + operator_defined::all().len());
    }
}

//! Shared identifiers and bitmask types used across the catalog, measurement
//! provider, admission and report-service components.
//!
//! Labels and scopes are kept as compact bitmasks rather than string sets
//! (see spec §9): admission checks become bitwise subset tests instead of
//! set comparisons.

use std::fmt;

/// UE index as carried by the RIC in `ueid_c` / used internally to key
/// per-UE history. Not a full ASN.1 `UEID` — just the numeric index the
/// codec collaborator resolves to and from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UeId(pub u32);

impl fmt::Display for UeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ue#{}", self.0)
    }
}

/// PLMN identity (MCC + MNC), e.g. 001/01.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlmnId {
    pub mcc: String,
    pub mnc: String,
}

/// NR Cell Global Identifier: PLMN + NR Cell Identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellGlobalId {
    pub plmn: PlmnId,
    pub nr_cell_identity: u64,
}

impl CellGlobalId {
    pub fn is_zero(&self) -> bool {
        self.nr_cell_identity == 0
    }
}

/// S-NSSAI: slice/service type plus an optional slice differentiator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SNssai {
    pub sst: u8,
    pub sd: Option<u32>,
}

/// Measurement-object-class bitmask (which RAN object a metric belongs to).
///
/// Mirrors the bit layout used by the reference catalog this was distilled
/// from (`e2sm_kpm_measurement_object_t`): a plain bitmask rather than an
/// enum, since a metric can legitimately belong to more than one class
/// (e.g. a delay metric sourced from either the CU or the CU-UP, depending
/// on split configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasObjMask(pub u32);

impl MeasObjMask {
    pub const E2_NODE: MeasObjMask = MeasObjMask(0x0001);
    pub const GNB_CU_UP: MeasObjMask = MeasObjMask(0x0002);
    pub const NR_CELL_CU: MeasObjMask = MeasObjMask(0x0004);
    pub const NR_CELL_DU: MeasObjMask = MeasObjMask(0x0008);
    pub const NR_CELL_RELATION: MeasObjMask = MeasObjMask(0x0010);
    pub const EUTRAN_RELATION: MeasObjMask = MeasObjMask(0x0020);
    pub const BEAM: MeasObjMask = MeasObjMask(0x0040);
    pub const EP_F1U: MeasObjMask = MeasObjMask(0x0080);
    pub const EP_XNU: MeasObjMask = MeasObjMask(0x0100);
    pub const EP_X2U: MeasObjMask = MeasObjMask(0x0200);
    pub const ANY: MeasObjMask = MeasObjMask(0xffff);

    pub fn contains(self, other: MeasObjMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: MeasObjMask) -> MeasObjMask {
        MeasObjMask(self.0 | other.0)
    }

    /// Cell scope is required iff the class is confined to a single cell
    /// (cell-DU or cell-CU) — not merely overlapping one, since a metric
    /// sourced from either a cell object or a non-cell object (e.g.
    /// `NR_CELL_CU | GNB_CU_UP`) doesn't mandate a cell scope. Derived, never
    /// stored (spec §4.1).
    pub fn cell_scope_required(self) -> bool {
        const CELL_CLASSES: u32 = MeasObjMask::NR_CELL_DU.0 | MeasObjMask::NR_CELL_CU.0;
        self.0 != 0 && self.0 & !CELL_CLASSES == 0
    }
}

impl std::ops::BitOr for MeasObjMask {
    type Output = MeasObjMask;
    fn bitor(self, rhs: MeasObjMask) -> MeasObjMask {
        self.union(rhs)
    }
}

/// Label bitmask: a measurement's qualifier (e.g. per-5QI, per-slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelMask(pub u32);

impl LabelMask {
    pub const NO_LABEL: LabelMask = LabelMask(0);
    pub const PLMN_ID: LabelMask = LabelMask(1 << 0);
    pub const FIVE_QI: LabelMask = LabelMask(1 << 1);
    pub const SLICE_ID: LabelMask = LabelMask(1 << 2);
    pub const DIST_BIN_X: LabelMask = LabelMask(1 << 3);

    pub fn is_no_label(self) -> bool {
        self.0 == 0
    }

    pub fn is_subset_of(self, other: LabelMask) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn union(self, other: LabelMask) -> LabelMask {
        LabelMask(self.0 | other.0)
    }
}

impl std::ops::BitOr for LabelMask {
    type Output = LabelMask;
    fn bitor(self, rhs: LabelMask) -> LabelMask {
        self.union(rhs)
    }
}

/// Scope bitmask: a measurement's aggregation level (node / UE / QoS-flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeMask(pub u32);

impl ScopeMask {
    pub const NODE: ScopeMask = ScopeMask(1 << 0);
    pub const UE: ScopeMask = ScopeMask(1 << 1);
    pub const QOS_FLOW: ScopeMask = ScopeMask(1 << 2);
    pub const ALL: ScopeMask = ScopeMask(Self::NODE.0 | Self::UE.0 | Self::QOS_FLOW.0);

    pub fn contains(self, other: ScopeMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: ScopeMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: ScopeMask) -> ScopeMask {
        ScopeMask(self.0 | other.0)
    }
}

impl std::ops::BitOr for ScopeMask {
    type Output = ScopeMask;
    fn bitor(self, rhs: ScopeMask) -> ScopeMask {
        self.union(rhs)
    }
}

/// Query scope for a single `get_meas_data` call: node-level, a specific
/// (possibly empty) UE list, or UE-conditional (style 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Node,
    Ue,
    UeConditional,
}

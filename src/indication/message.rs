//! E2SM-KPM indication message, formats 1/2/3 (spec §6, §4.4, §4.5): the
//! per-style row-buffer shapes, style-selected by the report service.
//!
//! C5 only asserts the invariants named in spec §4.5 ("row count > 0;
//! per-UE lengths equal"); packing the variant to bytes is the codec
//! collaborator's job.

use crate::measurement::MetricValue;
use crate::types::UeId;

/// One UE's rows within a Format-3 message (styles 4/5).
#[derive(Debug, Clone, PartialEq)]
pub struct UeMeasReport {
    pub ue_id: UeId,
    pub rows: Vec<Vec<MetricValue>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicationMessage {
    /// Styles 1/2: one row per tick, one `meas_data_item` per metric.
    Format1 { rows: Vec<Vec<MetricValue>> },
    /// Style 3: the monotonic matching-UE list plus one row per tick, each
    /// row carrying one value per UE in `ue_list` order.
    Format2 { ue_list: Vec<UeId>, rows: Vec<Vec<MetricValue>> },
    /// Styles 4/5: one `ue_meas_report` per UE, each with its own row buffer.
    Format3 { ue_reports: Vec<UeMeasReport> },
}

impl IndicationMessage {
    /// Row count > 0 and, for Format 3, equal per-UE row counts (spec
    /// §4.5's packing invariants).
    pub fn is_well_formed(&self) -> bool {
        match self {
            IndicationMessage::Format1 { rows } => !rows.is_empty(),
            IndicationMessage::Format2 { rows, .. } => !rows.is_empty(),
            IndicationMessage::Format3 { ue_reports } => {
                !ue_reports.is_empty()
                    && ue_reports.iter().all(|r| !r.rows.is_empty())
                    && ue_reports.windows(2).all(|w| w[0].rows.len() == w[1].rows.len())
            },
        }
    }
}

//! Measurement provider (spec §4.2): buffers live metric samples from the
//! scheduler, RLC and PDCP layers and answers typed queries used by the
//! report services (C4).
//!
//! Grounded in `e2sm_kpm_du_meas_provider_impl`/`e2sm_kpm_cu_meas_provider_impl`:
//! a DU flavor backed by scheduler+RLC samples and a CU-UP flavor backed by
//! PDCP samples, sharing this trait and the `agg` helpers but registering
//! disjoint supported-metric tables (spec §9).

pub mod agg;
pub mod cuup;
pub mod du;

use crate::types::{CellGlobalId, LabelMask, ScopeMask, UeId};
use std::collections::VecDeque;

/// A single queried value. `NoValue` is a first-class outcome, not an error —
/// spec §4.2's "no-data policy" requires it be distinguishable from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Real(f64),
    NoValue,
}

impl MetricValue {
    pub fn is_no_value(&self) -> bool {
        matches!(self, MetricValue::NoValue)
    }
}

/// Bounded per-UE history (spec §3 "Per-UE metric history"): oldest entry
/// evicted when capacity is exceeded. Created lazily on first report.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    capacity: usize,
    samples: VecDeque<T>,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), samples: VecDeque::new() }
    }

    pub fn push(&mut self, sample: T) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Scheduler sample (spec §3): the single latest cell-level sample. Replaced,
/// not appended.
#[derive(Debug, Clone, Default)]
pub struct SchedulerCellMetrics {
    pub nof_prbs: u32,
    pub nof_dl_slots: u32,
    pub nof_ul_slots: u32,
    pub nof_prach_preambles: u32,
    pub ue_metrics: Vec<SchedulerUeMetrics>,
}

#[derive(Debug, Clone, Default)]
pub struct SchedulerUeMetrics {
    pub ue_id: UeId,
    pub tot_pdsch_prbs_used: u32,
    pub tot_pusch_prbs_used: u32,
    /// Mean uplink air-interface delay, when the scheduler had a sample.
    pub avg_ul_delay_ms: Option<f64>,
}

/// One RLC-layer report (DU side): DL transmit volume, UL receive volume and
/// latency, accumulated per granularity tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RlcMetrics {
    pub ue_id: UeId,
    pub tx_num_sdu_bytes: u64,
    pub rx_num_sdu_bytes: u64,
    pub rx_num_sdus: u64,
    pub rx_sdu_latency_us: u64,
}

/// One PDCP-layer report (CU-UP side): DL/UL PDU volume for a QoS flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdcpMetrics {
    pub ue_id: UeId,
    pub tx_num_pdu_bytes: u64,
    pub rx_num_pdu_bytes: u64,
}

/// Shared query surface (spec §4.2). DU and CU-UP providers both implement
/// this; no common base beyond the contract (spec §9).
pub trait MeasurementProvider: Send + Sync {
    fn report_scheduler_metrics(&self, metrics: SchedulerCellMetrics);
    fn report_rlc_metrics(&self, metrics: RlcMetrics);
    fn report_pdcp_metrics(&self, metrics: PdcpMetrics);

    fn supported_metric_names(&self, scope: ScopeMask) -> Vec<String>;
    fn is_metric_supported(&self, name: &str, label: LabelMask, scope: ScopeMask, cell_scope: bool) -> bool;
    fn is_ue_supported(&self, ue: UeId) -> bool;
    fn is_cell_supported(&self, cgi: &CellGlobalId) -> bool;
    fn is_test_cond_supported(&self, cond: &crate::action_def::TestCondition) -> bool;

    /// UEs currently matching a set of conditions (styles 3/4).
    fn matching_ues(&self, conditions: &[crate::action_def::MatchingCondition]) -> Vec<UeId>;

    /// Fills `out` per spec §4.2's result shape: one record at node scope
    /// (`ue_list` empty), or one record per UE in order otherwise. Returns
    /// `false` without mutating `out` for an unknown metric name.
    fn get_meas_data(
        &self,
        name: &str,
        labels: LabelMask,
        ue_list: &[UeId],
        cell: Option<&CellGlobalId>,
        out: &mut Vec<MetricValue>,
    ) -> bool;
}

/// Cross-checks a provider's declared metric set against the catalog at
/// construction time (spec §7 "invariant violation" / §4.1): every metric
/// the provider claims to support must be known to the catalog, with
/// compatible legal labels, legal scopes and cell-scope requirement. Called
/// once from each concrete provider's constructor; a mismatch is treated as
/// a fatal configuration defect, logged at `error` before the constructor
/// returns it to the caller.
pub(crate) fn validate_against_catalog(
    provider: &dyn MeasurementProvider,
    catalog: &crate::catalog::MetricCatalog,
) -> Result<(), crate::error::CatalogError> {
    use crate::error::CatalogError;

    for name in provider.supported_metric_names(ScopeMask::ALL) {
        let Some(desc) = catalog.lookup(&name) else {
            tracing::error!(metric = %name, "provider metric is absent from the catalog");
            return Err(CatalogError::UnknownMetric { name });
        };

        let provider_labels = LabelMask::NO_LABEL;
        if !provider_labels.is_subset_of(desc.legal_labels) {
            tracing::error!(metric = %name, "provider labels are not a subset of the catalog's legal labels");
            return Err(CatalogError::LabelMismatch {
                name,
                provider_labels: provider_labels.0,
                catalog_labels: desc.legal_labels.0,
            });
        }

        // Probe the provider's own behavior rather than trusting a separate
        // declaration: call `is_metric_supported` with both cell-scope
        // values to learn which one (if either is exclusive) it requires,
        // then with each scope bit at that cell-scope value to learn its
        // declared scope set.
        let sup_cell = provider.is_metric_supported(&name, LabelMask::NO_LABEL, ScopeMask::ALL, true);
        let sup_no_cell = provider.is_metric_supported(&name, LabelMask::NO_LABEL, ScopeMask::ALL, false);
        let cell_scope_probe = sup_cell || !sup_no_cell;

        let mut provider_scopes = ScopeMask(0);
        for bit in [ScopeMask::NODE, ScopeMask::UE, ScopeMask::QOS_FLOW] {
            if provider.is_metric_supported(&name, LabelMask::NO_LABEL, bit, cell_scope_probe) {
                provider_scopes = provider_scopes.union(bit);
            }
        }
        if provider_scopes.0 & !desc.legal_scopes.0 != 0 {
            tracing::error!(metric = %name, "provider scopes are not a subset of the catalog's legal scopes");
            return Err(CatalogError::ScopeMismatch {
                name,
                provider_scopes: provider_scopes.0,
                catalog_scopes: desc.legal_scopes.0,
            });
        }

        let requires_cell_scope = sup_cell && !sup_no_cell;
        let forbids_cell_scope = sup_no_cell && !sup_cell;
        if (desc.cell_scope_required() && forbids_cell_scope) || (!desc.cell_scope_required() && requires_cell_scope)
        {
            tracing::error!(metric = %name, "provider cell-scope behavior contradicts the catalog's requirement");
            return Err(CatalogError::CellScopeMismatch { name });
        }
    }
    Ok(())
}

/// Shared "no sample yet" fan-out (spec §4.2 "No-data policy"): at node
/// scope (`ue_list` empty) a zero sentinel of the metric's own data type is
/// emitted — never `no_value`, since node data is always "real" (used by
/// Style 1's readiness rule); at UE scope with a non-empty list, `no_value`
/// is emitted per requested UE instead.
pub(crate) fn fill_no_sample(
    data_type: crate::catalog::DataType,
    ue_list: &[UeId],
    out: &mut Vec<MetricValue>,
) -> bool {
    if ue_list.is_empty() {
        let zero = match data_type {
            crate::catalog::DataType::Integer => MetricValue::Integer(0),
            crate::catalog::DataType::Real => MetricValue::Real(0.0),
        };
        out.push(zero);
    } else {
        out.extend(std::iter::repeat(MetricValue::NoValue).take(ue_list.len()));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut h: BoundedHistory<u32> = BoundedHistory::new(3);
        for i in 0..5 {
            h.push(i);
        }
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn fill_no_sample_emits_zero_at_node_scope_and_no_value_per_ue() {
        let mut out = Vec::new();
        fill_no_sample(crate::catalog::DataType::Integer, &[], &mut out);
        assert_eq!(out, vec![MetricValue::Integer(0)]);

        let mut out = Vec::new();
        fill_no_sample(crate::catalog::DataType::Integer, &[UeId(1), UeId(2)], &mut out);
        assert_eq!(out, vec![MetricValue::NoValue, MetricValue::NoValue]);
    }
}

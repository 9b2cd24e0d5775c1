//! CU-UP-side measurement provider: PDCP samples (spec §9 "DU and CU-UP
//! flavors register disjoint metric-name → getter tables").
//!
//! Grounded in `e2sm_kpm_cu_meas_provider_impl.cpp`: a smaller
//! `supported_metrics` table than the DU side, backed by PDCP PDU-volume
//! counters rather than scheduler/RLC samples.

use super::agg;
use super::{BoundedHistory, MeasurementProvider, MetricValue, PdcpMetrics};
use crate::action_def::{Comparator, MatchingCondition, TestCondition, TestConditionKind, TestConditionValue};
use crate::types::{CellGlobalId, LabelMask, SNssai, ScopeMask, UeId};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Per-UE core-facing QoS attributes, used to evaluate style-3/4 test
/// conditions that are core/slice concerns rather than radio ones.
#[derive(Debug, Clone, Default)]
pub struct UeCoreAttributes {
    pub gbr: Option<f64>,
    pub ambr: Option<f64>,
    pub s_nssai: Option<SNssai>,
}

struct State {
    pdcp_history: HashMap<UeId, BoundedHistory<PdcpMetrics>>,
    known_ues: HashSet<UeId>,
    known_cells: HashSet<CellGlobalId>,
    ue_core: HashMap<UeId, UeCoreAttributes>,
}

pub struct CuUpMeasurementProvider {
    state: RwLock<State>,
    pdcp_history_depth: usize,
}

impl CuUpMeasurementProvider {
    /// Builds the provider and cross-checks its declared metric set against
    /// `catalog` (spec §7 "invariant violation"); an inconsistency is a
    /// fatal configuration defect, so construction fails rather than the
    /// provider starting up with a mismatched contract.
    pub fn new(catalog: &crate::catalog::MetricCatalog, pdcp_history_depth: usize) -> Result<Self, crate::error::CatalogError> {
        let provider = Self {
            state: RwLock::new(State {
                pdcp_history: HashMap::new(),
                known_ues: HashSet::new(),
                known_cells: HashSet::new(),
                ue_core: HashMap::new(),
            }),
            pdcp_history_depth,
        };
        super::validate_against_catalog(&provider, catalog)?;
        Ok(provider)
    }

    pub fn register_ue(&self, ue: UeId) {
        self.state.write().unwrap().known_ues.insert(ue);
    }

    pub fn register_cell(&self, cgi: CellGlobalId) {
        self.state.write().unwrap().known_cells.insert(cgi);
    }

    pub fn set_ue_core_attributes(&self, ue: UeId, attrs: UeCoreAttributes) {
        self.state.write().unwrap().ue_core.insert(ue, attrs);
    }

    fn get_pdu_volume(&self, ue_list: &[UeId], dl: bool, out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        if st.pdcp_history.is_empty() {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        }
        if ue_list.is_empty() {
            let total: u64 = st
                .pdcp_history
                .values()
                .flat_map(|h| h.iter())
                .map(|m| if dl { m.tx_num_pdu_bytes } else { m.rx_num_pdu_bytes })
                .sum();
            out.push(MetricValue::Integer(agg::bytes_to_kbit(total)));
        } else {
            for ue in ue_list {
                match st.pdcp_history.get(ue) {
                    Some(h) if !h.is_empty() => {
                        let total: u64 = h.iter().map(|m| if dl { m.tx_num_pdu_bytes } else { m.rx_num_pdu_bytes }).sum();
                        out.push(MetricValue::Integer(agg::bytes_to_kbit(total)));
                    },
                    _ => out.push(MetricValue::NoValue),
                }
            }
        }
        true
    }

    fn evaluate_test_cond(&self, ue: UeId, cond: &TestCondition) -> bool {
        let st = self.state.read().unwrap();
        let Some(attrs) = st.ue_core.get(&ue) else { return false };
        match &cond.kind {
            TestConditionKind::SNssai(want) => {
                matches!((&attrs.s_nssai, &cond.comparator), (Some(have), Comparator::Equal) if have == want)
            },
            TestConditionKind::Gbr => Self::cmp(attrs.gbr, &cond.comparator, &cond.value),
            TestConditionKind::Ambr => Self::cmp(attrs.ambr, &cond.comparator, &cond.value),
            _ => false,
        }
    }

    fn cmp(actual: Option<f64>, comparator: &Comparator, value: &TestConditionValue) -> bool {
        if matches!(comparator, Comparator::Present) {
            return actual.is_some();
        }
        let Some(actual) = actual else { return false };
        let want = match value {
            TestConditionValue::Integer(v) => *v as f64,
            TestConditionValue::Real(v) => *v,
            TestConditionValue::NssaiValue(_) => return false,
        };
        match comparator {
            Comparator::Equal => actual == want,
            Comparator::Greater => actual > want,
            Comparator::Less => actual < want,
            _ => false,
        }
    }
}

impl MeasurementProvider for CuUpMeasurementProvider {
    fn report_scheduler_metrics(&self, _metrics: super::SchedulerCellMetrics) {
        // Not a CU-UP-layer concern; the DU provider handles scheduler samples.
    }

    fn report_rlc_metrics(&self, _metrics: super::RlcMetrics) {
        // Not a CU-UP-layer concern; the DU provider handles RLC samples.
    }

    fn report_pdcp_metrics(&self, metrics: PdcpMetrics) {
        let mut st = self.state.write().unwrap();
        let depth = self.pdcp_history_depth;
        st.pdcp_history.entry(metrics.ue_id).or_insert_with(|| BoundedHistory::new(depth)).push(metrics);
    }

    fn supported_metric_names(&self, scope: ScopeMask) -> Vec<String> {
        SUPPORTED_NAMES.iter().filter(|_| scope.intersects(ScopeMask::ALL)).map(|s| s.to_string()).collect()
    }

    fn is_metric_supported(&self, name: &str, label: LabelMask, scope: ScopeMask, cell_scope: bool) -> bool {
        if !label.is_no_label() {
            return false;
        }
        match name {
            "QosFlow.PdcpPduVolumeDL" | "QosFlow.PdcpPduVolumeUL" => {
                scope.intersects(ScopeMask::ALL) && !cell_scope
            },
            _ => false,
        }
    }

    fn is_ue_supported(&self, ue: UeId) -> bool {
        self.state.read().unwrap().known_ues.contains(&ue)
    }

    fn is_cell_supported(&self, cgi: &CellGlobalId) -> bool {
        self.state.read().unwrap().known_cells.contains(cgi)
    }

    fn is_test_cond_supported(&self, cond: &TestCondition) -> bool {
        matches!(cond.kind, TestConditionKind::Gbr | TestConditionKind::Ambr | TestConditionKind::SNssai(_))
    }

    fn matching_ues(&self, conditions: &[MatchingCondition]) -> Vec<UeId> {
        let known: Vec<UeId> = self.state.read().unwrap().known_ues.iter().copied().collect();
        let test_conds: Vec<&TestCondition> = conditions
            .iter()
            .filter_map(|c| if let MatchingCondition::TestCond(tc) = c { Some(tc) } else { None })
            .collect();
        if test_conds.is_empty() {
            return known;
        }
        let mut matched: Vec<UeId> =
            known.into_iter().filter(|ue| test_conds.iter().all(|tc| self.evaluate_test_cond(*ue, tc))).collect();
        matched.sort();
        matched
    }

    fn get_meas_data(
        &self,
        name: &str,
        labels: LabelMask,
        ue_list: &[UeId],
        _cell: Option<&CellGlobalId>,
        out: &mut Vec<MetricValue>,
    ) -> bool {
        if !labels.is_no_label() {
            return false;
        }
        match name {
            "QosFlow.PdcpPduVolumeDL" => self.get_pdu_volume(ue_list, true, out),
            "QosFlow.PdcpPduVolumeUL" => self.get_pdu_volume(ue_list, false, out),
            _ => false,
        }
    }
}

const SUPPORTED_NAMES: &[&str] = &["QosFlow.PdcpPduVolumeDL", "QosFlow.PdcpPduVolumeUL"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_level_pdu_volume_sums_across_ues() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = CuUpMeasurementProvider::new(&catalog, 10).unwrap();
        p.register_ue(UeId(1));
        p.register_ue(UeId(2));
        p.report_pdcp_metrics(PdcpMetrics { ue_id: UeId(1), tx_num_pdu_bytes: 5000, rx_num_pdu_bytes: 0 });
        p.report_pdcp_metrics(PdcpMetrics { ue_id: UeId(2), tx_num_pdu_bytes: 5000, rx_num_pdu_bytes: 0 });

        let mut out = Vec::new();
        p.get_meas_data("QosFlow.PdcpPduVolumeDL", LabelMask::NO_LABEL, &[], None, &mut out);
        assert_eq!(out, vec![MetricValue::Integer(10000 * 8 / 1000)]);
    }

    #[test]
    fn unsupported_metric_name_returns_false() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = CuUpMeasurementProvider::new(&catalog, 10).unwrap();
        let mut out = Vec::new();
        assert!(!p.get_meas_data("RRU.PrbUsedDl", LabelMask::NO_LABEL, &[], None, &mut out));
    }
}

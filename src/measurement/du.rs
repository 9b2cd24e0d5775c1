//! DU-side measurement provider: scheduler + RLC samples (spec §9 "DU and
//! CU-UP flavors register disjoint metric-name → getter tables").
//!
//! Grounded in `e2sm_kpm_du_meas_provider_impl.cpp`: a `supported_metrics`
//! table keyed by name, a single latest scheduler sample ("replaced, not
//! appended"), and a per-UE bounded RLC history.

use super::agg;
use super::{BoundedHistory, MeasurementProvider, MetricValue, RlcMetrics, SchedulerCellMetrics};
use crate::action_def::{Comparator, MatchingCondition, TestCondition, TestConditionKind, TestConditionValue};
use crate::types::{CellGlobalId, LabelMask, ScopeMask, UeId};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Per-UE radio-condition snapshot, used to evaluate style-3/4 test
/// conditions (`Rsrp`/`Rsrq`/`Cqi` are DU-local radio quantities; the DU
/// provider doesn't track core-facing conditions like GBR/AMBR/S-NSSAI).
#[derive(Debug, Clone, Copy, Default)]
pub struct UeRadioConditions {
    pub rsrp: Option<f64>,
    pub rsrq: Option<f64>,
    pub cqi: Option<i64>,
}

struct State {
    last_cell_metrics: Option<SchedulerCellMetrics>,
    rlc_history: HashMap<UeId, BoundedHistory<RlcMetrics>>,
    known_ues: HashSet<UeId>,
    known_cells: HashSet<CellGlobalId>,
    ue_radio: HashMap<UeId, UeRadioConditions>,
}

pub struct DuMeasurementProvider {
    state: RwLock<State>,
    rlc_history_depth: usize,
}

impl DuMeasurementProvider {
    /// Builds the provider and cross-checks its declared metric set against
    /// `catalog` (spec §7 "invariant violation"); an inconsistency is a
    /// fatal configuration defect, so construction fails rather than the
    /// provider starting up with a mismatched contract.
    pub fn new(catalog: &crate::catalog::MetricCatalog, rlc_history_depth: usize) -> Result<Self, crate::error::CatalogError> {
        let provider = Self {
            state: RwLock::new(State {
                last_cell_metrics: None,
                rlc_history: HashMap::new(),
                known_ues: HashSet::new(),
                known_cells: HashSet::new(),
                ue_radio: HashMap::new(),
            }),
            rlc_history_depth,
        };
        super::validate_against_catalog(&provider, catalog)?;
        Ok(provider)
    }

    /// Registers a UE as known to this provider (done by the DU's UE context
    /// manager, before any metric report arrives for it).
    pub fn register_ue(&self, ue: UeId) {
        self.state.write().unwrap().known_ues.insert(ue);
    }

    pub fn register_cell(&self, cgi: CellGlobalId) {
        self.state.write().unwrap().known_cells.insert(cgi);
    }

    pub fn set_ue_radio_conditions(&self, ue: UeId, conditions: UeRadioConditions) {
        self.state.write().unwrap().ue_radio.insert(ue, conditions);
    }

    fn get_prb_used_dl(&self, ue_list: &[UeId], out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        let Some(cell) = &st.last_cell_metrics else {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        };
        if ue_list.is_empty() {
            let used: u32 =
                cell.ue_metrics.iter().map(|u| agg::per_ue_prb_usage(u.tot_pdsch_prbs_used, cell.nof_dl_slots)).sum();
            out.push(MetricValue::Integer(used as i64));
        } else {
            for ue in ue_list {
                match cell.ue_metrics.iter().find(|u| &u.ue_id == ue) {
                    Some(u) => out.push(MetricValue::Integer(
                        agg::per_ue_prb_usage(u.tot_pdsch_prbs_used, cell.nof_dl_slots) as i64,
                    )),
                    None => out.push(MetricValue::NoValue),
                }
            }
        }
        true
    }

    fn get_prb_used_ul(&self, ue_list: &[UeId], out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        let Some(cell) = &st.last_cell_metrics else {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        };
        if ue_list.is_empty() {
            let used: u32 =
                cell.ue_metrics.iter().map(|u| agg::per_ue_prb_usage(u.tot_pusch_prbs_used, cell.nof_ul_slots)).sum();
            out.push(MetricValue::Integer(used as i64));
        } else {
            for ue in ue_list {
                match cell.ue_metrics.iter().find(|u| &u.ue_id == ue) {
                    Some(u) => out.push(MetricValue::Integer(
                        agg::per_ue_prb_usage(u.tot_pusch_prbs_used, cell.nof_ul_slots) as i64,
                    )),
                    None => out.push(MetricValue::NoValue),
                }
            }
        }
        true
    }

    fn get_prb_avail(&self, ue_list: &[UeId], used_dl: bool, out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        let Some(cell) = &st.last_cell_metrics else {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        };
        let slots = if used_dl { cell.nof_dl_slots } else { cell.nof_ul_slots };
        let used: u32 = cell
            .ue_metrics
            .iter()
            .map(|u| agg::per_ue_prb_usage(if used_dl { u.tot_pdsch_prbs_used } else { u.tot_pusch_prbs_used }, slots))
            .sum();
        let avail = cell.nof_prbs.saturating_sub(used);
        if ue_list.is_empty() {
            out.push(MetricValue::Integer(avail as i64));
        } else {
            for _ in ue_list {
                out.push(MetricValue::Integer(avail as i64));
            }
        }
        true
    }

    fn get_prb_tot(&self, ue_list: &[UeId], dl: bool, out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        let Some(cell) = &st.last_cell_metrics else {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        };
        let slots = if dl { cell.nof_dl_slots } else { cell.nof_ul_slots };
        let used: u32 = cell
            .ue_metrics
            .iter()
            .map(|u| agg::per_ue_prb_usage(if dl { u.tot_pdsch_prbs_used } else { u.tot_pusch_prbs_used }, slots))
            .sum();
        let percent = agg::prb_usage_percent(used, cell.nof_prbs);
        if ue_list.is_empty() {
            out.push(MetricValue::Integer(percent as i64));
        } else {
            for _ in ue_list {
                out.push(MetricValue::Integer(percent as i64));
            }
        }
        true
    }

    fn get_rlc_volume(&self, ue_list: &[UeId], dl: bool, out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        if st.rlc_history.is_empty() {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        }
        if ue_list.is_empty() {
            let total: u64 = st
                .rlc_history
                .values()
                .flat_map(|h| h.iter())
                .map(|m| if dl { m.tx_num_sdu_bytes } else { m.rx_num_sdu_bytes })
                .sum();
            out.push(MetricValue::Integer(agg::bytes_to_kbit(total)));
        } else {
            for ue in ue_list {
                match st.rlc_history.get(ue) {
                    Some(h) if !h.is_empty() => {
                        let total: u64 = h.iter().map(|m| if dl { m.tx_num_sdu_bytes } else { m.rx_num_sdu_bytes }).sum();
                        out.push(MetricValue::Integer(agg::bytes_to_kbit(total)));
                    },
                    _ => out.push(MetricValue::NoValue),
                }
            }
        }
        true
    }

    fn get_rlc_delay_ul(&self, ue_list: &[UeId], out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        if st.rlc_history.is_empty() {
            return super::fill_no_sample(crate::catalog::DataType::Real, ue_list, out);
        }
        if ue_list.is_empty() {
            let per_ue = st.rlc_history.values().map(|h| {
                let sum: u64 = h.iter().map(|m| m.rx_sdu_latency_us).sum();
                let count: u64 = h.iter().map(|m| m.rx_num_sdus).sum();
                (sum as f64, count)
            });
            match agg::mean_of_ue_means(per_ue) {
                Some(us) => out.push(MetricValue::Real(us / 100.0)), // unit 0.1ms
                None => out.push(MetricValue::NoValue),
            }
        } else {
            for ue in ue_list {
                match st.rlc_history.get(ue) {
                    Some(h) if !h.is_empty() => {
                        let sum: u64 = h.iter().map(|m| m.rx_sdu_latency_us).sum();
                        let count: u64 = h.iter().map(|m| m.rx_num_sdus).sum();
                        if count > 0 {
                            out.push(MetricValue::Real((sum as f64 / count as f64) / 100.0));
                        } else {
                            out.push(MetricValue::NoValue);
                        }
                    },
                    _ => out.push(MetricValue::NoValue),
                }
            }
        }
        true
    }

    fn get_delay_ul_air(&self, ue_list: &[UeId], out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        let Some(cell) = &st.last_cell_metrics else {
            return super::fill_no_sample(crate::catalog::DataType::Real, ue_list, out);
        };
        if ue_list.is_empty() {
            let per_ue = cell.ue_metrics.iter().map(|u| (u.avg_ul_delay_ms.unwrap_or(0.0), 1u64));
            match agg::mean_of_ue_means(per_ue) {
                Some(ms) => out.push(MetricValue::Real(ms * 10.0)),
                None => out.push(MetricValue::NoValue),
            }
        } else {
            for ue in ue_list {
                match cell.ue_metrics.iter().find(|u| &u.ue_id == ue).and_then(|u| u.avg_ul_delay_ms) {
                    Some(ms) => out.push(MetricValue::Real(ms * 10.0)),
                    None => out.push(MetricValue::NoValue),
                }
            }
        }
        true
    }

    fn get_prach_count(&self, ue_list: &[UeId], out: &mut Vec<MetricValue>) -> bool {
        let st = self.state.read().unwrap();
        let Some(cell) = &st.last_cell_metrics else {
            return super::fill_no_sample(crate::catalog::DataType::Integer, ue_list, out);
        };
        out.push(MetricValue::Integer(cell.nof_prach_preambles as i64));
        let _ = ue_list;
        true
    }

    fn evaluate_test_cond(&self, ue: UeId, cond: &TestCondition) -> bool {
        let st = self.state.read().unwrap();
        let Some(radio) = st.ue_radio.get(&ue) else { return false };
        let actual = match cond.kind {
            TestConditionKind::Rsrp => radio.rsrp,
            TestConditionKind::Rsrq => radio.rsrq,
            TestConditionKind::Cqi => radio.cqi.map(|c| c as f64),
            _ => return false,
        };
        let Some(actual) = actual else { return cond.comparator != Comparator::Present };
        match (&cond.comparator, &cond.value) {
            (Comparator::Present, _) => true,
            (Comparator::Equal, TestConditionValue::Integer(v)) => actual == *v as f64,
            (Comparator::Equal, TestConditionValue::Real(v)) => actual == *v,
            (Comparator::Greater, TestConditionValue::Integer(v)) => actual > *v as f64,
            (Comparator::Greater, TestConditionValue::Real(v)) => actual > *v,
            (Comparator::Less, TestConditionValue::Integer(v)) => actual < *v as f64,
            (Comparator::Less, TestConditionValue::Real(v)) => actual < *v,
            _ => false,
        }
    }
}

impl MeasurementProvider for DuMeasurementProvider {
    fn report_scheduler_metrics(&self, metrics: SchedulerCellMetrics) {
        self.state.write().unwrap().last_cell_metrics = Some(metrics);
    }

    fn report_rlc_metrics(&self, metrics: RlcMetrics) {
        let mut st = self.state.write().unwrap();
        let depth = self.rlc_history_depth;
        st.rlc_history.entry(metrics.ue_id).or_insert_with(|| BoundedHistory::new(depth)).push(metrics);
    }

    fn report_pdcp_metrics(&self, _metrics: super::PdcpMetrics) {
        // Not a DU-layer concern; the CU-UP provider handles PDCP samples.
    }

    fn supported_metric_names(&self, scope: ScopeMask) -> Vec<String> {
        SUPPORTED_NAMES.iter().filter(|_| scope.intersects(ScopeMask::ALL)).map(|s| s.to_string()).collect()
    }

    fn is_metric_supported(&self, name: &str, label: LabelMask, scope: ScopeMask, cell_scope: bool) -> bool {
        if !label.is_no_label() {
            return false;
        }
        match name {
            "RRU.PrbUsedDl" | "RRU.PrbAvailDl" | "RRU.PrbTotDl" | "RRU.PrbUsedUl" | "RRU.PrbAvailUl"
            | "RRU.PrbTotUl" => scope.intersects(ScopeMask(ScopeMask::NODE.0 | ScopeMask::UE.0)) && cell_scope,
            "DRB.RlcSduTransmittedVolumeDL" | "DRB.RlcSduTransmittedVolumeUL" | "DRB.AirIfDelayUl"
            | "DRB.RlcDelayUl" => scope.intersects(ScopeMask::ALL) && cell_scope,
            "RACH.PreambleDedCell" => scope.intersects(ScopeMask::NODE) && cell_scope,
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
        matches!(cond.kind, TestConditionKind::Rsrp | TestConditionKind::Rsrq | TestConditionKind::Cqi)
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
            "RRU.PrbUsedDl" => self.get_prb_used_dl(ue_list, out),
            "RRU.PrbUsedUl" => self.get_prb_used_ul(ue_list, out),
            "RRU.PrbAvailDl" => self.get_prb_avail(ue_list, true, out),
            "RRU.PrbAvailUl" => self.get_prb_avail(ue_list, false, out),
            "RRU.PrbTotDl" => self.get_prb_tot(ue_list, true, out),
            "RRU.PrbTotUl" => self.get_prb_tot(ue_list, false, out),
            "DRB.RlcSduTransmittedVolumeDL" => self.get_rlc_volume(ue_list, true, out),
            "DRB.RlcSduTransmittedVolumeUL" => self.get_rlc_volume(ue_list, false, out),
            "DRB.RlcDelayUl" => self.get_rlc_delay_ul(ue_list, out),
            "DRB.AirIfDelayUl" => self.get_delay_ul_air(ue_list, out),
            "RACH.PreambleDedCell" => self.get_prach_count(ue_list, out),
            _ => false,
        }
    }
}

const SUPPORTED_NAMES: &[&str] = &[
    "RRU.PrbUsedDl",
    "RRU.PrbUsedUl",
    "RRU.PrbAvailDl",
    "RRU.PrbAvailUl",
    "RRU.PrbTotDl",
    "RRU.PrbTotUl",
    "DRB.RlcSduTransmittedVolumeDL",
    "DRB.RlcSduTransmittedVolumeUL",
    "DRB.RlcDelayUl",
    "DRB.AirIfDelayUl",
    "RACH.PreambleDedCell",
];

//! Style 4 — subscription over condition-matching UEs (spec §4.4.4).
//!
//! Grounded in `e2sm_kpm_report_service_style4::collect_measurements()`: an
//! "ever-matched" UE list, grown each tick, with per-UE row back-fill for
//! newly matched UEs and a single row-counter shared by every metric column.

use super::{ReportService, Window};
use crate::action_def::{MatchingCondition, MeasurementInfoItem, TestCondition};
use crate::indication::{IndicationHeader, IndicationMessage, UeMeasReport};
use crate::measurement::{MeasurementProvider, MetricValue};
use crate::types::{CellGlobalId, UeId};
use std::collections::HashMap;
use std::sync::Arc;

pub struct Style4Report {
    provider: Arc<dyn MeasurementProvider>,
    matching_ue_cond_list: Vec<TestCondition>,
    meas_info_list: Vec<MeasurementInfoItem>,
    cell_global_id: Option<CellGlobalId>,
    ue_order: Vec<UeId>,
    per_ue_rows: HashMap<UeId, Vec<Vec<MetricValue>>>,
    window: Window<()>,
    ready: bool,
}

impl Style4Report {
    pub fn new(
        matching_ue_cond_list: Vec<TestCondition>,
        meas_info_list: Vec<MeasurementInfoItem>,
        cell_global_id: Option<CellGlobalId>,
        provider: Arc<dyn MeasurementProvider>,
    ) -> Self {
        Self {
            provider,
            matching_ue_cond_list,
            meas_info_list,
            cell_global_id,
            ue_order: Vec::new(),
            per_ue_rows: HashMap::new(),
            window: Window::new(),
            ready: false,
        }
    }

    fn collected_rows(&self) -> usize {
        self.window.len()
    }
}

impl ReportService for Style4Report {
    fn collect_measurements(&mut self) -> bool {
        let conds: Vec<MatchingCondition> =
            self.matching_ue_cond_list.iter().cloned().map(MatchingCondition::TestCond).collect();
        let cur_matching = self.provider.matching_ues(&conds);

        for ue in cur_matching {
            if !self.ue_order.contains(&ue) {
                self.ue_order.push(ue);
                let backfill = vec![vec![MetricValue::NoValue; self.meas_info_list.len()]; self.collected_rows()];
                self.per_ue_rows.insert(ue, backfill);
            }
        }

        if self.ue_order.is_empty() {
            return false;
        }

        self.ready = true;
        let tick = self.collected_rows();
        for ue in &self.ue_order {
            let rows = self.per_ue_rows.get_mut(ue).unwrap();
            if rows.len() == tick {
                rows.push(Vec::with_capacity(self.meas_info_list.len()));
            }
        }
        for item in &self.meas_info_list {
            let mut out = Vec::new();
            self.provider.get_meas_data(&item.name, item.label, &self.ue_order, self.cell_global_id.as_ref(), &mut out);
            for (idx, ue) in self.ue_order.iter().enumerate() {
                let value = out.get(idx).copied().unwrap_or(MetricValue::NoValue);
                self.per_ue_rows.get_mut(ue).unwrap()[tick].push(value);
            }
        }
        self.window.push(());
        true
    }

    fn is_ind_msg_ready(&mut self) -> bool {
        if !self.ready {
            self.clear();
            return false;
        }
        true
    }

    fn get_indication_header(&self) -> IndicationHeader {
        IndicationHeader::new(self.window.start_time())
    }

    fn get_indication_message(&mut self) -> IndicationMessage {
        let ue_reports = self
            .ue_order
            .iter()
            .map(|ue| UeMeasReport { ue_id: *ue, rows: self.per_ue_rows.remove(ue).unwrap_or_default() })
            .collect();
        self.clear();
        IndicationMessage::Format3 { ue_reports }
    }
}

impl Style4Report {
    /// Resets everything: unlike styles 4/5's fixed-shape siblings, a new
    /// indication probably carries a different UE set (spec §4.4.4; grounded
    /// in the source's `clear_collect_measurements` clearing the whole list).
    fn clear(&mut self) {
        self.ue_order.clear();
        self.per_ue_rows.clear();
        self.window.take();
        self.ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_def::{Comparator, TestConditionKind, TestConditionValue};
    use crate::measurement::du::{DuMeasurementProvider, UeRadioConditions};
    use crate::types::LabelMask;

    fn info(names: &[&str]) -> Vec<MeasurementInfoItem> {
        names.iter().map(|n| MeasurementInfoItem { name: n.to_string(), label: LabelMask::NO_LABEL }).collect()
    }

    fn rsrp_cond(threshold: f64) -> TestCondition {
        TestCondition { kind: TestConditionKind::Rsrp, comparator: Comparator::Greater, value: TestConditionValue::Real(threshold) }
    }

    #[test]
    fn skip_tick_when_nothing_ever_matched() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = DuMeasurementProvider::new(&catalog, 30).unwrap();
        p.register_ue(UeId(1));
        let provider: Arc<dyn MeasurementProvider> = Arc::new(p);
        let mut svc = Style4Report::new(vec![rsrp_cond(-90.0)], info(&["RRU.PrbUsedDl"]), None, provider);
        assert!(!svc.collect_measurements());
    }

    #[test]
    fn newly_matched_ue_gets_backfilled_rows() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = Arc::new(DuMeasurementProvider::new(&catalog, 30).unwrap());
        p.register_ue(UeId(1));
        p.register_ue(UeId(2));
        p.set_ue_radio_conditions(UeId(1), UeRadioConditions { rsrp: Some(-80.0), rsrq: None, cqi: None });
        let provider: Arc<dyn MeasurementProvider> = p.clone();
        let mut svc = Style4Report::new(vec![rsrp_cond(-90.0)], info(&["RRU.PrbUsedDl"]), None, provider);

        assert!(svc.collect_measurements());
        assert!(svc.collect_measurements());
        p.set_ue_radio_conditions(UeId(2), UeRadioConditions { rsrp: Some(-70.0), rsrq: None, cqi: None });
        assert!(svc.collect_measurements());

        let rows_for_ue1 = &svc.per_ue_rows[&UeId(1)];
        let rows_for_ue2 = &svc.per_ue_rows[&UeId(2)];
        assert_eq!(rows_for_ue1.len(), 3);
        assert_eq!(rows_for_ue2.len(), 3);
        assert_eq!(rows_for_ue2[0], vec![MetricValue::NoValue]);
        assert_eq!(rows_for_ue2[1], vec![MetricValue::NoValue]);
    }
}

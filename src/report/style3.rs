//! Style 3 — condition-matching UE report (spec §4.4.3).
//!
//! Grounded in `e2sm_kpm_report_service_style3::collect_measurements()`: a
//! monotonic matching-UE list, back-filled with `no_value` for newly
//! matched UEs, and — per the source's own `TODO: currently only single
//! meas_cond_ueid is supported` — only the first condition group is
//! evaluated in the collection path (spec §9's Open Question on multi-group
//! composition).

use super::{ReportService, Window};
use crate::action_def::{ConditionGroup, MatchingCondition};
use crate::indication::{IndicationHeader, IndicationMessage};
use crate::measurement::{MeasurementProvider, MetricValue};
use crate::types::{CellGlobalId, UeId};
use std::sync::Arc;

pub struct Style3Report {
    provider: Arc<dyn MeasurementProvider>,
    group: ConditionGroup,
    cell_global_id: Option<CellGlobalId>,
    matching_ues: Vec<UeId>,
    window: Window<Vec<MetricValue>>,
    ready: bool,
}

impl Style3Report {
    pub fn new(
        condition_groups: Vec<ConditionGroup>,
        cell_global_id: Option<CellGlobalId>,
        provider: Arc<dyn MeasurementProvider>,
    ) -> Self {
        if condition_groups.len() > 1 {
            tracing::debug!(
                groups = condition_groups.len(),
                "style-3 subscription carries multiple condition groups; only the first is collected"
            );
        }
        let group = condition_groups.into_iter().next().unwrap_or(ConditionGroup {
            meas_type: String::new(),
            matching_cond: vec![MatchingCondition::MeasLabel(crate::types::LabelMask::NO_LABEL)],
        });
        Self { provider, group, cell_global_id, matching_ues: Vec::new(), window: Window::new(), ready: false }
    }
}

impl ReportService for Style3Report {
    fn collect_measurements(&mut self) -> bool {
        let cur_matching = self.provider.matching_ues(&self.group.matching_cond);

        if self.matching_ues.is_empty() && !cur_matching.is_empty() {
            self.matching_ues = cur_matching;
        } else if !self.matching_ues.is_empty() && !cur_matching.is_empty() {
            for ue in cur_matching {
                if !self.matching_ues.contains(&ue) {
                    self.matching_ues.push(ue);
                    for row in self.window.rows_mut() {
                        row.push(MetricValue::NoValue);
                    }
                }
            }
        }

        if self.matching_ues.is_empty() {
            // No UE has ever matched; skip the tick entirely.
            return false;
        }

        self.ready = true;
        let mut out = Vec::new();
        self.provider.get_meas_data(
            &self.group.meas_type,
            crate::types::LabelMask::NO_LABEL,
            &self.matching_ues,
            self.cell_global_id.as_ref(),
            &mut out,
        );
        self.window.push(out);
        true
    }

    fn is_ind_msg_ready(&mut self) -> bool {
        if !self.ready {
            self.window.take();
            return false;
        }
        true
    }

    fn get_indication_header(&self) -> IndicationHeader {
        IndicationHeader::new(self.window.start_time())
    }

    fn get_indication_message(&mut self) -> IndicationMessage {
        self.ready = false;
        IndicationMessage::Format2 { ue_list: self.matching_ues.clone(), rows: self.window.take() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_def::{Comparator, TestCondition, TestConditionKind, TestConditionValue};
    use crate::measurement::du::{DuMeasurementProvider, UeRadioConditions};

    fn rsrp_above(threshold: f64) -> ConditionGroup {
        ConditionGroup {
            meas_type: "RRU.PrbUsedDl".to_string(),
            matching_cond: vec![MatchingCondition::TestCond(TestCondition {
                kind: TestConditionKind::Rsrp,
                comparator: Comparator::Greater,
                value: TestConditionValue::Real(threshold),
            })],
        }
    }

    #[test]
    fn skips_tick_with_no_matching_ue_ever() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = DuMeasurementProvider::new(&catalog, 30).unwrap();
        p.register_ue(UeId(1));
        let provider: Arc<dyn MeasurementProvider> = Arc::new(p);
        let mut svc = Style3Report::new(vec![rsrp_above(-90.0)], None, provider);
        assert!(!svc.collect_measurements());
        assert!(!svc.is_ind_msg_ready());
    }

    #[test]
    fn new_ue_backfills_previous_rows_with_no_value() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = Arc::new(DuMeasurementProvider::new(&catalog, 30).unwrap());
        p.register_ue(UeId(1));
        p.register_ue(UeId(2));
        p.set_ue_radio_conditions(UeId(1), UeRadioConditions { rsrp: Some(-80.0), rsrq: None, cqi: None });
        let provider: Arc<dyn MeasurementProvider> = p.clone();
        let mut svc = Style3Report::new(vec![rsrp_above(-90.0)], None, provider);

        assert!(svc.collect_measurements());
        assert_eq!(svc.matching_ues, vec![UeId(1)]);

        p.set_ue_radio_conditions(UeId(2), UeRadioConditions { rsrp: Some(-70.0), rsrq: None, cqi: None });
        assert!(svc.collect_measurements());
        assert_eq!(svc.matching_ues, vec![UeId(1), UeId(2)]);
        assert_eq!(svc.window.rows()[0].len(), 2);
    }
}

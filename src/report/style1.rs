//! Style 1 — node-scoped periodic report (spec §4.4.1).
//!
//! Grounded in `e2sm_kpm_report_service_style1::collect_measurements()`: one
//! row per tick, one value per metric, queried with an empty UE list. Always
//! ready on the first append since node data is never `no_value`.

use super::{ReportService, Window};
use crate::action_def::{MeasurementInfoItem, Style1Definition};
use crate::indication::{IndicationHeader, IndicationMessage};
use crate::measurement::{MeasurementProvider, MetricValue};
use crate::types::CellGlobalId;
use std::sync::Arc;

pub struct Style1Report {
    provider: Arc<dyn MeasurementProvider>,
    meas_info_list: Vec<MeasurementInfoItem>,
    cell_global_id: Option<CellGlobalId>,
    window: Window<Vec<MetricValue>>,
    ready: bool,
}

impl Style1Report {
    pub fn new(def: Style1Definition, provider: Arc<dyn MeasurementProvider>) -> Self {
        Self {
            provider,
            meas_info_list: def.meas_info_list,
            cell_global_id: def.cell_global_id,
            window: Window::new(),
            ready: false,
        }
    }
}

impl ReportService for Style1Report {
    fn collect_measurements(&mut self) -> bool {
        let mut row = Vec::with_capacity(self.meas_info_list.len());
        for item in &self.meas_info_list {
            let mut out = Vec::new();
            self.provider.get_meas_data(&item.name, item.label, &[], self.cell_global_id.as_ref(), &mut out);
            row.push(out.into_iter().next().unwrap_or(MetricValue::NoValue));
        }
        self.window.push(row);
        // The E2 node is always present, so every appended record is a real
        // value: the indication is ready as soon as anything is collected.
        self.ready = true;
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
        IndicationMessage::Format1 { rows: self.window.take() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::du::DuMeasurementProvider;
    use crate::types::LabelMask;

    fn def(names: &[&str]) -> Style1Definition {
        Style1Definition {
            meas_info_list: names
                .iter()
                .map(|n| MeasurementInfoItem { name: n.to_string(), label: LabelMask::NO_LABEL })
                .collect(),
            granularity_period_ms: 100,
            cell_global_id: None,
        }
    }

    #[test]
    fn ready_after_first_tick() {
        let catalog = crate::catalog::MetricCatalog::new();
        let provider: Arc<dyn MeasurementProvider> = Arc::new(DuMeasurementProvider::new(&catalog, 30).unwrap());
        let mut svc = Style1Report::new(def(&["RACH.PreambleDedCell"]), provider);
        assert!(!svc.is_ind_msg_ready());
        svc.collect_measurements();
        assert!(svc.is_ind_msg_ready());
    }

    #[test]
    fn emit_clears_window_and_resets_readiness() {
        let catalog = crate::catalog::MetricCatalog::new();
        let provider: Arc<dyn MeasurementProvider> = Arc::new(DuMeasurementProvider::new(&catalog, 30).unwrap());
        let mut svc = Style1Report::new(def(&["RACH.PreambleDedCell"]), provider);
        svc.collect_measurements();
        svc.collect_measurements();
        let msg = svc.get_indication_message();
        match msg {
            IndicationMessage::Format1 { rows } => assert_eq!(rows.len(), 2),
            _ => panic!("expected Format1"),
        }
        assert!(!svc.is_ind_msg_ready());
    }
}

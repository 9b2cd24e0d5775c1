//! Style 2 — single-UE periodic report (spec §4.4.2).
//!
//! Grounded in `e2sm_kpm_report_service_style2::collect_measurements()`:
//! identical to style 1 except the query carries a fixed single-UE list.
//! Unlike the node scope, a UE may have no sample yet, so readiness only
//! flips once a real value has actually been observed.

use super::{ReportService, Window};
use crate::action_def::{MeasurementInfoItem, Style1Definition};
use crate::indication::{IndicationHeader, IndicationMessage};
use crate::measurement::{MeasurementProvider, MetricValue};
use crate::types::{CellGlobalId, UeId};
use std::sync::Arc;

pub struct Style2Report {
    provider: Arc<dyn MeasurementProvider>,
    meas_info_list: Vec<MeasurementInfoItem>,
    cell_global_id: Option<CellGlobalId>,
    ue_id: UeId,
    window: Window<Vec<MetricValue>>,
    ready: bool,
}

impl Style2Report {
    pub fn new(def: Style1Definition, ue_id: UeId, provider: Arc<dyn MeasurementProvider>) -> Self {
        Self {
            provider,
            meas_info_list: def.meas_info_list,
            cell_global_id: def.cell_global_id,
            ue_id,
            window: Window::new(),
            ready: false,
        }
    }
}

impl ReportService for Style2Report {
    fn collect_measurements(&mut self) -> bool {
        let ue_list = [self.ue_id];
        let mut row = Vec::with_capacity(self.meas_info_list.len());
        for item in &self.meas_info_list {
            let mut out = Vec::new();
            self.provider.get_meas_data(&item.name, item.label, &ue_list, self.cell_global_id.as_ref(), &mut out);
            row.push(out.into_iter().next().unwrap_or(MetricValue::NoValue));
        }
        if !self.ready && row.iter().any(|v| !v.is_no_value()) {
            self.ready = true;
        }
        self.window.push(row);
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
    use crate::measurement::RlcMetrics;
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
    fn not_ready_until_real_value_observed() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = DuMeasurementProvider::new(&catalog, 30).unwrap();
        p.register_ue(UeId(1));
        let provider: Arc<dyn MeasurementProvider> = Arc::new(p);
        let mut svc = Style2Report::new(def(&["DRB.RlcSduTransmittedVolumeDL"]), UeId(1), provider);
        svc.collect_measurements();
        assert!(!svc.is_ind_msg_ready());
    }

    #[test]
    fn ready_once_ue_has_real_sample() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = DuMeasurementProvider::new(&catalog, 30).unwrap();
        p.register_ue(UeId(1));
        p.report_rlc_metrics(RlcMetrics {
            ue_id: UeId(1),
            tx_num_sdu_bytes: 1000,
            rx_num_sdu_bytes: 500,
            rx_num_sdus: 5,
            rx_sdu_latency_us: 100,
        });
        let provider: Arc<dyn MeasurementProvider> = Arc::new(p);
        let mut svc = Style2Report::new(def(&["DRB.RlcSduTransmittedVolumeDL"]), UeId(1), provider);
        svc.collect_measurements();
        assert!(svc.is_ind_msg_ready());
    }
}

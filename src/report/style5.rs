//! Style 5 — subscription over a fixed UE list (spec §4.4.5).
//!
//! Grounded in `e2sm_kpm_report_service_style5`: the UE list is fixed at
//! subscription time; readiness flips once any non-`no_value` is observed
//! across all UEs/metrics; at emit time, UEs whose entire window is
//! `no_value`-only are dropped from the message.

use super::{ReportService, Window};
use crate::action_def::{MeasurementInfoItem, Style1Definition};
use crate::indication::{IndicationHeader, IndicationMessage, UeMeasReport};
use crate::measurement::{MeasurementProvider, MetricValue};
use crate::types::{CellGlobalId, UeId};
use std::collections::HashMap;
use std::sync::Arc;

pub struct Style5Report {
    provider: Arc<dyn MeasurementProvider>,
    meas_info_list: Vec<MeasurementInfoItem>,
    cell_global_id: Option<CellGlobalId>,
    ue_ids: Vec<UeId>,
    per_ue_rows: HashMap<UeId, Vec<Vec<MetricValue>>>,
    window: Window<()>,
    ready: bool,
}

impl Style5Report {
    pub fn new(def: Style1Definition, matching_ueid_list: Vec<UeId>, provider: Arc<dyn MeasurementProvider>) -> Self {
        let per_ue_rows = matching_ueid_list.iter().map(|ue| (*ue, Vec::new())).collect();
        Self {
            provider,
            meas_info_list: def.meas_info_list,
            cell_global_id: def.cell_global_id,
            ue_ids: matching_ueid_list,
            per_ue_rows,
            window: Window::new(),
            ready: false,
        }
    }
}

impl ReportService for Style5Report {
    fn collect_measurements(&mut self) -> bool {
        let tick = self.window.len();
        for item in &self.meas_info_list {
            let mut out = Vec::new();
            self.provider.get_meas_data(&item.name, item.label, &self.ue_ids, self.cell_global_id.as_ref(), &mut out);
            if !self.ready && out.iter().any(|v| !v.is_no_value()) {
                self.ready = true;
            }
            for (idx, ue) in self.ue_ids.iter().enumerate() {
                let value = out.get(idx).copied().unwrap_or(MetricValue::NoValue);
                let rows = self.per_ue_rows.get_mut(ue).unwrap();
                if rows.len() == tick {
                    rows.push(Vec::with_capacity(self.meas_info_list.len()));
                }
                rows[tick].push(value);
            }
        }
        self.window.push(());
        true
    }

    fn is_ind_msg_ready(&mut self) -> bool {
        if !self.ready {
            self.window.take();
            for rows in self.per_ue_rows.values_mut() {
                rows.clear();
            }
            return false;
        }
        true
    }

    fn get_indication_header(&self) -> IndicationHeader {
        IndicationHeader::new(self.window.start_time())
    }

    fn get_indication_message(&mut self) -> IndicationMessage {
        let ue_reports = self
            .ue_ids
            .iter()
            .filter_map(|ue| {
                let rows = self.per_ue_rows.get(ue)?;
                let only_no_value = rows.iter().all(|row| row.iter().all(|v| v.is_no_value()));
                if only_no_value {
                    None
                } else {
                    Some(UeMeasReport { ue_id: *ue, rows: rows.clone() })
                }
            })
            .collect();
        self.window.take();
        for rows in self.per_ue_rows.values_mut() {
            rows.clear();
        }
        self.ready = false;
        IndicationMessage::Format3 { ue_reports }
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
    fn drops_ue_with_only_no_value_rows() {
        let catalog = crate::catalog::MetricCatalog::new();
        let p = DuMeasurementProvider::new(&catalog, 30).unwrap();
        p.register_ue(UeId(1));
        p.register_ue(UeId(2));
        p.report_rlc_metrics(RlcMetrics {
            ue_id: UeId(1),
            tx_num_sdu_bytes: 1000,
            rx_num_sdu_bytes: 500,
            rx_num_sdus: 5,
            rx_sdu_latency_us: 100,
        });
        let provider: Arc<dyn MeasurementProvider> = Arc::new(p);
        let mut svc = Style5Report::new(def(&["DRB.RlcSduTransmittedVolumeDL"]), vec![UeId(1), UeId(2)], provider);
        svc.collect_measurements();
        assert!(svc.is_ind_msg_ready());

        let msg = svc.get_indication_message();
        match msg {
            IndicationMessage::Format3 { ue_reports } => {
                assert_eq!(ue_reports.len(), 1);
                assert_eq!(ue_reports[0].ue_id, UeId(1));
            },
            _ => panic!("expected Format3"),
        }
    }
}

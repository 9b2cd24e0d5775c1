//! Report services (spec §4.4): the five E2SM-KPM styles, each a long-lived
//! object driven by periodic `collect_measurements()` ticks and drained by
//! `get_indication_message()`.
//!
//! Grounded in `e2sm_kpm_report_service_impl.cpp`: a shared base (window
//! start-time, ready flag, clear-on-emit) with one `collect_measurements`
//! shape per style.

pub mod style1;
pub mod style2;
pub mod style3;
pub mod style4;
pub mod style5;

use crate::indication::{IndicationHeader, IndicationMessage};
use chrono::{DateTime, Utc};

/// Public contract shared by all five styles (spec §4.4).
pub trait ReportService: Send {
    /// Called once per granularity tick. Returns `true` if a row was
    /// appended; styles 3/4 may return `false` when nothing currently
    /// matches and nothing has matched historically.
    fn collect_measurements(&mut self) -> bool;

    /// True iff at least one appended value across the current window is
    /// non-`no_value`. A `false` result discards the collected window, since
    /// it would otherwise only ever carry `no_value` placeholders (spec
    /// §4.4's "false reports must never be emitted").
    fn is_ind_msg_ready(&mut self) -> bool;

    fn get_indication_header(&self) -> IndicationHeader;

    /// Produces the packed message body. Emitting clears the window.
    fn get_indication_message(&mut self) -> IndicationMessage;
}

/// Row buffer shared by every style: a start timestamp plus accumulated
/// rows, reset on `take`. `start_time` is captured at window creation and at
/// every `take`, never at emit time (spec §4.4 "Header `collection_start_time`
/// is captured at the instant the window starts filling").
pub(crate) struct Window<Row> {
    start_time: DateTime<Utc>,
    rows: Vec<Row>,
}

impl<Row> Window<Row> {
    pub(crate) fn new() -> Self {
        Self { start_time: Utc::now(), rows: Vec::new() }
    }

    pub(crate) fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub(crate) fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub(crate) fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Drains the window and starts a fresh one (spec's "clear-on-emit").
    pub(crate) fn take(&mut self) -> Vec<Row> {
        self.start_time = Utc::now();
        std::mem::take(&mut self.rows)
    }
}

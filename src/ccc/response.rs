//! E2SM-CCC control response shapes (spec §4.6 step 4): per requested
//! structure, either an "accepted" item echoing old/current values or a
//! "failed" item echoing old/requested values with an `unspecified` cause.
//!
//! Grounded in `convert_to_e2sm_response()`.

use super::request::RrmPolicyRatio;
use crate::types::CellGlobalId;

/// Failure cause carried on a `Failed` outcome (spec §4.6 step 4). The
/// executor never distinguishes *why* the configurator rejected a structure,
/// so `Unspecified` is the only variant today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Unspecified,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigStructureOutcome {
    Accepted { ran_cfg_structure_name: String, old_values: RrmPolicyRatio, current_values: RrmPolicyRatio },
    Failed { ran_cfg_structure_name: String, old_values: RrmPolicyRatio, requested_values: RrmPolicyRatio, cause: Cause },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellControlOutcome {
    pub cell_global_id: CellGlobalId,
    pub structures: Vec<ConfigStructureOutcome>,
}

/// Success is all-or-nothing across the request (spec §4.6 "Ordering
/// contract"): either every cell's structures are accepted, or every one of
/// them carries a failed item.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlResponse {
    pub success: bool,
    pub cells: Vec<CellControlOutcome>,
}

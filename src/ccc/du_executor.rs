//! O-RRMPolicyRatio DU executor (spec §4.6): support check, translation to a
//! configurator request, and response construction.
//!
//! Grounded in `e2sm_ccc_control_action_du_executor.cpp`'s
//! `e2sm_ccc_control_o_rrm_policy_ratio_executor`: `ric_control_action_supported`
//! (style/format/cell/structure-name checks), `convert_to_du_config_request`
//! (flatten to cells × rrm-policy groups) and `convert_to_e2sm_response`
//! (old/current echo on success, old/requested + `unspecified` cause on
//! failure).

use super::configurator::NodeConfigurator;
use super::request::{CellControlRequest, ConfigStructureRequest, ControlRequest, RrmPolicyRatio};
use super::response::{Cause, CellControlOutcome, ConfigStructureOutcome, ControlResponse};
use crate::error::ControlError;
use crate::types::CellGlobalId;

pub const RAN_CFG_STRUCTURE_NAME: &str = "O-RRMPolicyRatio";

#[derive(Debug, Clone, PartialEq)]
pub struct DuCellParamConfig {
    pub cell_global_id: CellGlobalId,
    pub rrm_policy_ratio_list: Vec<RrmPolicyRatio>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DuParamConfigRequest {
    pub cells: Vec<DuCellParamConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuParamConfigResponse {
    pub success: bool,
}

/// Spec §4.6 steps 1–3: reject before ever calling the configurator.
pub fn check_control_request_supported(req: &ControlRequest) -> Result<(), ControlError> {
    if req.style_id != 2 {
        return Err(ControlError::UnsupportedStyle(req.style_id));
    }
    if req.message_format != 2 {
        return Err(ControlError::UnsupportedFormat(req.message_format));
    }
    for cell in &req.cells {
        if cell.cell_global_id.is_zero() {
            return Err(ControlError::InvalidCellGlobalId);
        }
        if cell.structures.is_empty() {
            return Err(ControlError::EmptyPolicyList);
        }
        for structure in &cell.structures {
            if structure.ran_cfg_structure_name != RAN_CFG_STRUCTURE_NAME {
                return Err(ControlError::UnknownConfigStructure(structure.ran_cfg_structure_name.clone()));
            }
            check_rrm_policy_ratio(&structure.new_values)?;
        }
    }
    Ok(())
}

fn check_rrm_policy_ratio(policy: &RrmPolicyRatio) -> Result<(), ControlError> {
    if policy.policy_members.is_empty() {
        return Err(ControlError::EmptyMemberList);
    }
    if policy.min_prb_ratio.is_none() || policy.max_prb_ratio.is_none() || policy.dedicated_prb_ratio.is_none() {
        return Err(ControlError::MissingRatio);
    }
    Ok(())
}

fn to_du_request(req: &ControlRequest) -> DuParamConfigRequest {
    DuParamConfigRequest {
        cells: req
            .cells
            .iter()
            .map(|cell: &CellControlRequest| DuCellParamConfig {
                cell_global_id: cell.cell_global_id.clone(),
                rrm_policy_ratio_list: cell.structures.iter().map(|s| s.new_values.clone()).collect(),
            })
            .collect(),
    }
}

fn to_control_response(req: &ControlRequest, success: bool) -> ControlResponse {
    ControlResponse {
        success,
        cells: req
            .cells
            .iter()
            .map(|cell| CellControlOutcome {
                cell_global_id: cell.cell_global_id.clone(),
                structures: cell
                    .structures
                    .iter()
                    .map(|s: &ConfigStructureRequest| {
                        if success {
                            ConfigStructureOutcome::Accepted {
                                ran_cfg_structure_name: s.ran_cfg_structure_name.clone(),
                                old_values: s.old_values.clone(),
                                current_values: s.new_values.clone(),
                            }
                        } else {
                            ConfigStructureOutcome::Failed {
                                ran_cfg_structure_name: s.ran_cfg_structure_name.clone(),
                                old_values: s.old_values.clone(),
                                requested_values: s.new_values.clone(),
                                cause: Cause::Unspecified,
                            }
                        }
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Executes a style-2 O-RRMPolicyRatio control request end to end (spec
/// §4.6). The configurator is awaited exactly once; its outcome is applied
/// uniformly across every requested structure — no partial application.
pub async fn execute_control_request(
    req: &ControlRequest,
    configurator: &dyn NodeConfigurator,
) -> Result<ControlResponse, ControlError> {
    check_control_request_supported(req)?;

    let du_request = to_du_request(req);
    let du_response = configurator.apply(du_request).await;

    if !du_response.success {
        tracing::debug!("node configurator rejected O-RRMPolicyRatio control request");
    }
    Ok(to_control_response(req, du_response.success))
}

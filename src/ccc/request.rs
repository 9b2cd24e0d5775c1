//! E2SM-CCC control request shapes (spec §4.6): style-2 cell control,
//! currently specialized to a single RAN configuration structure,
//! `O-RRMPolicyRatio`.
//!
//! Grounded in `e2sm_ccc_control_action_du_executor.cpp`'s
//! `convert_to_du_config_request`: per cell, a list of RRM policy-ratio
//! groups, each with a resource type, a policy-member list and three
//! percent ratios.

use crate::types::{CellGlobalId, PlmnId, SNssai};

/// DL-PRB or UL-PRB (spec §4.6: "resource-type (DL-PRB / UL-PRB)").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    PrbDl,
    PrbUl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrmPolicyMember {
    pub plmn: PlmnId,
    pub s_nssai: SNssai,
}

/// One O-RRMPolicyRatio structure's requested values.
#[derive(Debug, Clone, PartialEq)]
pub struct RrmPolicyRatio {
    pub resource_type: ResourceType,
    pub policy_members: Vec<RrmPolicyMember>,
    pub min_prb_ratio: Option<u8>,
    pub max_prb_ratio: Option<u8>,
    pub dedicated_prb_ratio: Option<u8>,
}

/// A single requested RAN configuration structure, carrying both the old
/// (current) and newly requested attribute values — echoed back verbatim
/// in the response regardless of outcome (spec §4.6 step 4).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStructureRequest {
    pub ran_cfg_structure_name: String,
    pub old_values: RrmPolicyRatio,
    pub new_values: RrmPolicyRatio,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellControlRequest {
    pub cell_global_id: CellGlobalId,
    pub structures: Vec<ConfigStructureRequest>,
}

/// Style-2 control request body (spec §4.6): control header format 1 +
/// control message format 2.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlRequest {
    pub style_id: u8,
    pub message_format: u8,
    pub cells: Vec<CellControlRequest>,
}

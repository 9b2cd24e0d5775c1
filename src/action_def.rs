//! Action-definition record and the shared wire-shape types it's built from
//! (spec §3 "Action-definition record", §6 "event trigger definition").
//!
//! This is the decoded shape the ASN.1 PER codec collaborator is assumed to
//! produce — the tagged union keyed by style, one variant per E2SM-KPM
//! action-definition format (spec §4.3/§6).

use crate::types::{CellGlobalId, LabelMask, SNssai, UeId};

/// E2SM-KPM event trigger definition, format 1 (spec §6): a single
/// reporting-period integer in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTriggerDefinition {
    pub report_period_ms: u32,
}

/// One entry of a style-1-shaped measurement-info list: a metric name plus
/// the label it's requested under (spec §4.2 "current contract accepts only
/// NO_LABEL").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementInfoItem {
    pub name: String,
    pub label: LabelMask,
}

/// Comparator for a test condition (spec §4.4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    Greater,
    Less,
    Contains,
    Present,
}

/// Which RAN quantity a test condition inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestConditionKind {
    Gbr,
    Ambr,
    Rsrp,
    Rsrq,
    Cqi,
    SNssai(SNssai),
}

/// Typed comparison value carried by a test condition.
#[derive(Debug, Clone, PartialEq)]
pub enum TestConditionValue {
    Integer(i64),
    Real(f64),
    NssaiValue(SNssai),
}

/// A single test condition: `kind` compared via `comparator` against
/// `value` (spec §4.4.3 "comparison ops equal/greater/less/contains/present
/// against a typed value").
#[derive(Debug, Clone, PartialEq)]
pub struct TestCondition {
    pub kind: TestConditionKind,
    pub comparator: Comparator,
    pub value: TestConditionValue,
}

/// One entry of a style-3 condition group's matching-conditions list:
/// either a measurement label (contributes a label-info entry, no
/// comparison) or a test condition (spec §4.3 "Style 3").
#[derive(Debug, Clone, PartialEq)]
pub enum MatchingCondition {
    MeasLabel(LabelMask),
    TestCond(TestCondition),
}

/// One style-3 condition group: the metric it reports plus the conditions
/// that gate which UEs' values get appended to it. The action definition
/// carries a list of these (`meas_cond_list`); only group 0 is evaluated in
/// the collection path (spec §9's Open Question on multi-group support).
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    pub meas_type: String,
    pub matching_cond: Vec<MatchingCondition>,
}

/// Shared style-1 payload, embedded verbatim inside styles 2, 4 and 5.
#[derive(Debug, Clone, PartialEq)]
pub struct Style1Definition {
    pub meas_info_list: Vec<MeasurementInfoItem>,
    pub granularity_period_ms: u32,
    pub cell_global_id: Option<CellGlobalId>,
}

/// Tagged union keyed by style (spec §3 "Action-definition record").
#[derive(Debug, Clone, PartialEq)]
pub enum ActionDefinition {
    Style1(Style1Definition),
    Style2 { style1: Style1Definition, ue_id: UeId },
    Style3 {
        condition_groups: Vec<ConditionGroup>,
        granularity_period_ms: u32,
        cell_global_id: Option<CellGlobalId>,
    },
    Style4 {
        matching_ue_cond_list: Vec<TestCondition>,
        style1: Box<Style1Definition>,
    },
    Style5 {
        matching_ueid_list: Vec<UeId>,
        style1: Box<Style1Definition>,
    },
}

impl ActionDefinition {
    pub fn granularity_period_ms(&self) -> u32 {
        match self {
            ActionDefinition::Style1(s) => s.granularity_period_ms,
            ActionDefinition::Style2 { style1, .. } => style1.granularity_period_ms,
            ActionDefinition::Style3 { granularity_period_ms, .. } => *granularity_period_ms,
            ActionDefinition::Style4 { style1, .. } => style1.granularity_period_ms,
            ActionDefinition::Style5 { style1, .. } => style1.granularity_period_ms,
        }
    }

    pub fn cell_global_id(&self) -> Option<&CellGlobalId> {
        match self {
            ActionDefinition::Style1(s) => s.cell_global_id.as_ref(),
            ActionDefinition::Style2 { style1, .. } => style1.cell_global_id.as_ref(),
            ActionDefinition::Style3 { cell_global_id, .. } => cell_global_id.as_ref(),
            ActionDefinition::Style4 { style1, .. } => style1.cell_global_id.as_ref(),
            ActionDefinition::Style5 { style1, .. } => style1.cell_global_id.as_ref(),
        }
    }

    pub fn style_number(&self) -> u8 {
        match self {
            ActionDefinition::Style1(_) => 1,
            ActionDefinition::Style2 { .. } => 2,
            ActionDefinition::Style3 { .. } => 3,
            ActionDefinition::Style4 { .. } => 4,
            ActionDefinition::Style5 { .. } => 5,
        }
    }
}

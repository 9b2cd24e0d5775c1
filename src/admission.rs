//! Action-definition admission (spec §4.3): gates subscriptions. The only
//! validation logic in the engine — everything downstream trusts admission.

use crate::action_def::{ActionDefinition, ConditionGroup, MatchingCondition, Style1Definition};
use crate::catalog::MetricCatalog;
use crate::error::AdmissionError;
use crate::measurement::MeasurementProvider;
use crate::types::{LabelMask, Scope, ScopeMask};

fn scope_mask_for(scope: Scope) -> ScopeMask {
    match scope {
        Scope::Node => ScopeMask::NODE,
        Scope::Ue | Scope::UeConditional => ScopeMask::UE,
    }
}

/// Common measurement-info checks shared by every style (spec §4.3 step 4):
/// label must be `NO_LABEL`; the provider must support the metric at the
/// style's implied scope and cell-scope flag.
fn check_style1_shape(
    style1: &Style1Definition,
    scope: Scope,
    catalog: &MetricCatalog,
    provider: &dyn MeasurementProvider,
) -> Result<(), AdmissionError> {
    if style1.granularity_period_ms == 0 {
        return Err(AdmissionError::NonPositiveGranularity);
    }
    if let Some(cgi) = &style1.cell_global_id {
        if !provider.is_cell_supported(cgi) {
            return Err(AdmissionError::UnsupportedCell(cgi.clone()));
        }
    }
    let cell_scope_flag = style1.cell_global_id.is_some();
    let scope_mask = scope_mask_for(scope);
    for item in &style1.meas_info_list {
        if !item.label.is_no_label() {
            return Err(AdmissionError::UnsupportedLabel(item.name.clone()));
        }
        if catalog.lookup(&item.name).is_none() {
            return Err(AdmissionError::UnsupportedMetric { name: item.name.clone() });
        }
        if !provider.is_metric_supported(&item.name, LabelMask::NO_LABEL, scope_mask, cell_scope_flag) {
            return Err(AdmissionError::UnsupportedMetric { name: item.name.clone() });
        }
    }
    Ok(())
}

fn check_matching_condition(
    cond: &MatchingCondition,
    catalog: &MetricCatalog,
    provider: &dyn MeasurementProvider,
) -> Result<(), AdmissionError> {
    match cond {
        MatchingCondition::TestCond(tc) => {
            if !provider.is_test_cond_supported(tc) {
                return Err(AdmissionError::UnsupportedTestCondition);
            }
            Ok(())
        },
        MatchingCondition::MeasLabel(label) => {
            if !label.is_no_label() {
                return Err(AdmissionError::UnsupportedLabel("(condition label)".to_string()));
            }
            let _ = catalog;
            Ok(())
        },
    }
}

/// Validates one style-3 condition group: its target metric at UE-conditional
/// scope (spec §4.3's scope mapping), plus every matching condition in its list.
fn check_condition_group(
    group: &ConditionGroup,
    cell_scope_flag: bool,
    catalog: &MetricCatalog,
    provider: &dyn MeasurementProvider,
) -> Result<(), AdmissionError> {
    if catalog.lookup(&group.meas_type).is_none() {
        return Err(AdmissionError::UnsupportedMetric { name: group.meas_type.clone() });
    }
    let scope_mask = scope_mask_for(Scope::UeConditional);
    if !provider.is_metric_supported(&group.meas_type, LabelMask::NO_LABEL, scope_mask, cell_scope_flag) {
        return Err(AdmissionError::UnsupportedMetric { name: group.meas_type.clone() });
    }
    for cond in &group.matching_cond {
        check_matching_condition(cond, catalog, provider)?;
    }
    Ok(())
}

fn try_admit(
    action: &ActionDefinition,
    catalog: &MetricCatalog,
    provider: &dyn MeasurementProvider,
) -> Result<(), AdmissionError> {
    match action {
        ActionDefinition::Style1(style1) => check_style1_shape(style1, Scope::Node, catalog, provider),
        ActionDefinition::Style2 { style1, ue_id } => {
            if !provider.is_ue_supported(*ue_id) {
                return Err(AdmissionError::UnsupportedUe(*ue_id));
            }
            check_style1_shape(style1, Scope::Ue, catalog, provider)
        },
        ActionDefinition::Style3 { condition_groups, granularity_period_ms, cell_global_id } => {
            if *granularity_period_ms == 0 {
                return Err(AdmissionError::NonPositiveGranularity);
            }
            if let Some(cgi) = cell_global_id {
                if !provider.is_cell_supported(cgi) {
                    return Err(AdmissionError::UnsupportedCell(cgi.clone()));
                }
            }
            let cell_scope_flag = cell_global_id.is_some();
            for group in condition_groups {
                check_condition_group(group, cell_scope_flag, catalog, provider)?;
            }
            Ok(())
        },
        ActionDefinition::Style4 { matching_ue_cond_list, style1 } => {
            for tc in matching_ue_cond_list {
                if !provider.is_test_cond_supported(tc) {
                    return Err(AdmissionError::UnsupportedTestCondition);
                }
            }
            check_style1_shape(style1, Scope::Ue, catalog, provider)
        },
        ActionDefinition::Style5 { matching_ueid_list, style1 } => {
            for ue in matching_ueid_list {
                if !provider.is_ue_supported(*ue) {
                    return Err(AdmissionError::UnsupportedUe(*ue));
                }
            }
            check_style1_shape(style1, Scope::Ue, catalog, provider)
        },
    }
}

/// `is_action_supported` (spec §4.3): a pure `bool`-returning predicate.
/// Admission failures are logged at `debug` with the specific sub-check
/// that rejected the action, but never surfaced as a `Result` — callers
/// only see accept/reject.
pub fn is_action_supported(
    action: &ActionDefinition,
    catalog: &MetricCatalog,
    provider: &dyn MeasurementProvider,
) -> bool {
    match try_admit(action, catalog, provider) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(style = action.style_number(), reason = %e, "action definition rejected");
            false
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_def::MeasurementInfoItem;
    use crate::measurement::du::DuMeasurementProvider;
    use crate::types::UeId;

    fn style1(names: &[&str], granularity_period_ms: u32) -> Style1Definition {
        Style1Definition {
            meas_info_list: names
                .iter()
                .map(|n| MeasurementInfoItem { name: n.to_string(), label: LabelMask::NO_LABEL })
                .collect(),
            granularity_period_ms,
            cell_global_id: None,
        }
    }

    #[test]
    fn style1_admits_known_node_metric() {
        let catalog = MetricCatalog::new();
        let provider = DuMeasurementProvider::new(&catalog, 30).unwrap();
        let action = ActionDefinition::Style1(style1(&["DRB.RlcSduTransmittedVolumeDL"], 100));
        assert!(is_action_supported(&action, &catalog, &provider));
    }

    #[test]
    fn style2_rejects_unknown_ue() {
        let catalog = MetricCatalog::new();
        let provider = DuMeasurementProvider::new(&catalog, 30).unwrap();
        let action = ActionDefinition::Style2 {
            style1: style1(&["DRB.RlcSduTransmittedVolumeDL"], 100),
            ue_id: UeId(99999),
        };
        assert!(!is_action_supported(&action, &catalog, &provider));
    }

    #[test]
    fn rejects_non_positive_granularity() {
        let catalog = MetricCatalog::new();
        let provider = DuMeasurementProvider::new(&catalog, 30).unwrap();
        let action = ActionDefinition::Style1(style1(&["DRB.RlcSduTransmittedVolumeDL"], 0));
        assert!(!is_action_supported(&action, &catalog, &provider));
    }

    #[test]
    fn admission_is_idempotent() {
        let catalog = MetricCatalog::new();
        let provider = DuMeasurementProvider::new(&catalog, 30).unwrap();
        let action = ActionDefinition::Style1(style1(&["DRB.RlcSduTransmittedVolumeDL"], 100));
        let first = is_action_supported(&action, &catalog, &provider);
        let second = is_action_supported(&action, &catalog, &provider);
        assert_eq!(first, second);
    }
}

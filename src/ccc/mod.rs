//! E2SM-CCC control-service engine (spec §4.6, C6): style-2 cell control
//! over the `O-RRMPolicyRatio` RAN configuration structure.
//!
//! Grounded in `e2sm_ccc_control_service_impl.cpp` and
//! `e2sm_ccc_control_action_du_executor.cpp`.

pub mod configurator;
pub mod du_executor;
pub mod request;
pub mod response;

pub use configurator::NodeConfigurator;
pub use du_executor::execute_control_request;
pub use request::ControlRequest;
pub use response::ControlResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellGlobalId, PlmnId, SNssai};
    use async_trait::async_trait;
    use du_executor::{DuParamConfigRequest, DuParamConfigResponse};
    use request::{CellControlRequest, ConfigStructureRequest, ResourceType, RrmPolicyMember, RrmPolicyRatio};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct FakeConfigurator {
        accept: bool,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl NodeConfigurator for FakeConfigurator {
        async fn apply(&self, _request: DuParamConfigRequest) -> DuParamConfigResponse {
            self.called.store(true, Ordering::SeqCst);
            DuParamConfigResponse { success: self.accept }
        }
    }

    fn cgi() -> CellGlobalId {
        CellGlobalId { plmn: PlmnId { mcc: "001".to_string(), mnc: "01".to_string() }, nr_cell_identity: 1 }
    }

    fn valid_request() -> ControlRequest {
        ControlRequest {
            style_id: 2,
            message_format: 2,
            cells: vec![CellControlRequest {
                cell_global_id: cgi(),
                structures: vec![ConfigStructureRequest {
                    ran_cfg_structure_name: "O-RRMPolicyRatio".to_string(),
                    old_values: RrmPolicyRatio {
                        resource_type: ResourceType::PrbDl,
                        policy_members: vec![RrmPolicyMember {
                            plmn: PlmnId { mcc: "001".to_string(), mnc: "01".to_string() },
                            s_nssai: SNssai { sst: 1, sd: None },
                        }],
                        min_prb_ratio: Some(10),
                        max_prb_ratio: Some(80),
                        dedicated_prb_ratio: Some(20),
                    },
                    new_values: RrmPolicyRatio {
                        resource_type: ResourceType::PrbDl,
                        policy_members: vec![RrmPolicyMember {
                            plmn: PlmnId { mcc: "001".to_string(), mnc: "01".to_string() },
                            s_nssai: SNssai { sst: 1, sd: None },
                        }],
                        min_prb_ratio: Some(20),
                        max_prb_ratio: Some(90),
                        dedicated_prb_ratio: Some(10),
                    },
                }],
            }],
        }
    }

    #[tokio::test]
    async fn success_echoes_current_values() {
        let called = Arc::new(AtomicBool::new(false));
        let configurator = FakeConfigurator { accept: true, called: called.clone() };
        let resp = execute_control_request(&valid_request(), &configurator).await.unwrap();
        assert!(called.load(Ordering::SeqCst));
        assert!(resp.success);
        match &resp.cells[0].structures[0] {
            response::ConfigStructureOutcome::Accepted { current_values, .. } => {
                assert_eq!(current_values.min_prb_ratio, Some(20));
            },
            _ => panic!("expected Accepted"),
        }
    }

    #[tokio::test]
    async fn configurator_failure_mirrors_requested_values() {
        let called = Arc::new(AtomicBool::new(false));
        let configurator = FakeConfigurator { accept: false, called };
        let resp = execute_control_request(&valid_request(), &configurator).await.unwrap();
        assert!(!resp.success);
        match &resp.cells[0].structures[0] {
            response::ConfigStructureOutcome::Failed { requested_values, cause, .. } => {
                assert_eq!(requested_values.min_prb_ratio, Some(20));
                assert_eq!(*cause, response::Cause::Unspecified);
            },
            _ => panic!("expected Failed"),
        }
    }

    #[tokio::test]
    async fn rejects_wrong_style_before_calling_configurator() {
        let called = Arc::new(AtomicBool::new(false));
        let configurator = FakeConfigurator { accept: true, called: called.clone() };
        let mut req = valid_request();
        req.style_id = 1;
        let result = execute_control_request(&req, &configurator).await;
        assert!(result.is_err());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn rejects_zero_cell_id() {
        let configurator = FakeConfigurator { accept: true, called: Arc::new(AtomicBool::new(false)) };
        let mut req = valid_request();
        req.cells[0].cell_global_id.nr_cell_identity = 0;
        assert!(execute_control_request(&req, &configurator).await.is_err());
    }

    #[tokio::test]
    async fn rejects_missing_ratio() {
        let configurator = FakeConfigurator { accept: true, called: Arc::new(AtomicBool::new(false)) };
        let mut req = valid_request();
        req.cells[0].structures[0].new_values.min_prb_ratio = None;
        assert!(execute_control_request(&req, &configurator).await.is_err());
    }
}

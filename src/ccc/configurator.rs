//! Node configurator collaborator boundary (spec §4.6 step 4: "call the node
//! configurator once"). Grounded in `srs_du::du_configurator`'s
//! `handle_operator_config_request`.

use super::du_executor::{DuParamConfigRequest, DuParamConfigResponse};
use async_trait::async_trait;

#[async_trait]
pub trait NodeConfigurator: Send + Sync {
    async fn apply(&self, request: DuParamConfigRequest) -> DuParamConfigResponse;
}

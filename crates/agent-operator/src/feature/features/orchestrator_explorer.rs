//! The orchestrator explorer, collecting the state of Kubernetes resources.
//!
//! The cluster agent collects the cluster-level resources, the process checks on the node agent
//! collect pods and containers.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{Feature, FeatureId, RequiredComponents, features::process_check_containers},
};

#[derive(Debug, Default)]
pub struct OrchestratorExplorerFeature {
    pub run_in_core_agent: bool,
}

pub(super) fn build(options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(OrchestratorExplorerFeature {
        run_in_core_agent: options.run_process_checks_in_core_agent,
    })
}

impl OrchestratorExplorerFeature {
    fn required(&self, multi_process: bool) -> RequiredComponents {
        RequiredComponents::default()
            .with_cluster_agent()
            .with_node_agent(
                process_check_containers(self.run_in_core_agent).iter().copied(),
                multi_process,
            )
    }
}

impl Feature for OrchestratorExplorerFeature {
    fn id(&self) -> FeatureId {
        FeatureId::OrchestratorExplorer
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.orchestrator_explorer.is_enabled_or(true) {
            return RequiredComponents::default();
        }
        self.required(multi_process)
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec.features.orchestrator_explorer.is_enabled() {
            return RequiredComponents::default();
        }
        self.required(false)
    }
}

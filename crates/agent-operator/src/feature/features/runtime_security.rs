//! Cloud workload security: runtime threat detection by the security agent, fed by the system
//! probe.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct RuntimeSecurityFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(RuntimeSecurityFeature)
}

impl RuntimeSecurityFeature {
    const CONTAINERS: [AgentContainerName; 3] = [
        AgentContainerName::Agent,
        AgentContainerName::SecurityAgent,
        AgentContainerName::SystemProbe,
    ];
}

impl Feature for RuntimeSecurityFeature {
    fn id(&self) -> FeatureId {
        FeatureId::RuntimeSecurity
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.runtime_security.is_enabled_or(false) {
            return RequiredComponents::default();
        }

        RequiredComponents::default()
            .with_cluster_agent()
            .with_node_agent(Self::CONTAINERS, multi_process)
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec.agent.security.runtime.is_enabled() {
            return RequiredComponents::default();
        }
        RequiredComponents::default()
            .with_cluster_agent()
            .with_node_agent(Self::CONTAINERS, false)
    }
}

//! Application performance monitoring through the trace agent.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct ApmFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(ApmFeature)
}

impl ApmFeature {
    const CONTAINERS: [AgentContainerName; 2] =
        [AgentContainerName::Agent, AgentContainerName::TraceAgent];
}

impl Feature for ApmFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Apm
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.apm.is_enabled_or(false) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent(Self::CONTAINERS, multi_process)
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec.agent.apm.is_enabled() {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent(Self::CONTAINERS, false)
    }
}

//! Cloud security posture management, run by the security agent.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct ComplianceFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(ComplianceFeature)
}

fn required(multi_process: bool) -> RequiredComponents {
    RequiredComponents::default()
        .with_cluster_agent()
        .with_node_agent(
            [AgentContainerName::Agent, AgentContainerName::SecurityAgent],
            multi_process,
        )
}

impl Feature for ComplianceFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Compliance
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if spec.features.compliance.is_enabled_or(false) {
            required(multi_process)
        } else {
            RequiredComponents::default()
        }
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if spec.agent.security.compliance.is_enabled() {
            required(false)
        } else {
            RequiredComponents::default()
        }
    }
}

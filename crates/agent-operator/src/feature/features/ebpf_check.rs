//! eBPF based checks run by the system probe.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct EbpfCheckFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(EbpfCheckFeature)
}

impl Feature for EbpfCheckFeature {
    fn id(&self) -> FeatureId {
        FeatureId::EbpfCheck
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.ebpf_check.is_enabled_or(false) {
            return RequiredComponents::default();
        }

        RequiredComponents::default().with_node_agent(
            [AgentContainerName::Agent, AgentContainerName::SystemProbe],
            multi_process,
        )
    }

    // Not available in v1alpha1.
    fn configure_v1alpha1(&mut self, _spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        RequiredComponents::default()
    }
}

//! Tracks the usage of TCP buffers through the system probe.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct TcpQueueLengthFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(TcpQueueLengthFeature)
}

impl Feature for TcpQueueLengthFeature {
    fn id(&self) -> FeatureId {
        FeatureId::TcpQueueLength
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if spec.features.tcp_queue_length.is_enabled_or(false) {
            RequiredComponents::default().with_node_agent(
                [AgentContainerName::Agent, AgentContainerName::SystemProbe],
                multi_process,
            )
        } else {
            RequiredComponents::default()
        }
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        let system_probe = &spec.agent.system_probe;
        if system_probe.is_enabled() && system_probe.enable_tcp_queue_length.unwrap_or(false) {
            RequiredComponents::default().with_node_agent(
                [AgentContainerName::Agent, AgentContainerName::SystemProbe],
                false,
            )
        } else {
            RequiredComponents::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1alpha1_needs_enabled_system_probe() {
        let mut spec = v1alpha1::AgentDeploymentSpec::default();
        assert!(!TcpQueueLengthFeature.configure_v1alpha1(&spec).is_configured());

        spec.agent.system_probe.enable_tcp_queue_length = Some(true);
        assert!(!TcpQueueLengthFeature.configure_v1alpha1(&spec).is_configured());

        spec.agent.system_probe.enabled = Some(false);
        assert!(!TcpQueueLengthFeature.configure_v1alpha1(&spec).is_configured());

        spec.agent.system_probe.enabled = Some(true);
        let required = TcpQueueLengthFeature.configure_v1alpha1(&spec);
        assert!(required.node_agent.is_enabled());
        assert!(required.node_agent.privileged);
    }
}

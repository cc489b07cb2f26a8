//! Universal service monitoring, detecting services from their network traffic.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct ServiceMonitoringFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(ServiceMonitoringFeature)
}

impl Feature for ServiceMonitoringFeature {
    fn id(&self) -> FeatureId {
        FeatureId::ServiceMonitoring
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.service_monitoring.is_enabled_or(false) {
            return RequiredComponents::default();
        }

        RequiredComponents::default().with_node_agent(
            [
                AgentContainerName::Agent,
                AgentContainerName::ProcessAgent,
                AgentContainerName::SystemProbe,
            ],
            multi_process,
        )
    }

    // Not available in v1alpha1.
    fn configure_v1alpha1(&mut self, _spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        RequiredComponents::default()
    }
}

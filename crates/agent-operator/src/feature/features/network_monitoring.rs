//! Network performance monitoring, based on connection tracking in the system probe.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct NetworkMonitoringFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(NetworkMonitoringFeature)
}

/// The process agent ships the connections collected by the system probe, the cluster agent
/// resolves their Kubernetes metadata.
fn required(multi_process: bool) -> RequiredComponents {
    RequiredComponents::default()
        .with_cluster_agent()
        .with_node_agent(
            [
                AgentContainerName::Agent,
                AgentContainerName::ProcessAgent,
                AgentContainerName::SystemProbe,
            ],
            multi_process,
        )
}

impl Feature for NetworkMonitoringFeature {
    fn id(&self) -> FeatureId {
        FeatureId::NetworkMonitoring
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if spec.features.network_monitoring.is_enabled_or(false) {
            required(multi_process)
        } else {
            RequiredComponents::default()
        }
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if spec.features.network_monitoring.is_enabled() {
            required(false)
        } else {
            RequiredComponents::default()
        }
    }
}

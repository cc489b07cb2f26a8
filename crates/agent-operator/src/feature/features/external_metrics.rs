//! The external metrics server of the cluster agent, serving metrics to horizontal pod
//! autoscalers.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct ExternalMetricsFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(ExternalMetricsFeature)
}

impl Feature for ExternalMetricsFeature {
    fn id(&self) -> FeatureId {
        FeatureId::ExternalMetrics
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        _multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.external_metrics_server.is_enabled_or(false) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_cluster_agent()
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec
            .cluster_agent
            .config
            .features
            .external_metrics
            .is_enabled()
        {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_cluster_agent()
    }
}

//! Autodiscovery of Prometheus and OpenMetrics endpoints.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct PrometheusScrapeFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(PrometheusScrapeFeature)
}

/// Endpoints on services are discovered by the cluster agent, the ones on pods by the node agents.
fn required(multi_process: bool) -> RequiredComponents {
    RequiredComponents::default()
        .with_cluster_agent()
        .with_node_agent([AgentContainerName::Agent], multi_process)
}

impl Feature for PrometheusScrapeFeature {
    fn id(&self) -> FeatureId {
        FeatureId::PrometheusScrape
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if spec.features.prometheus_scrape.is_enabled_or(false) {
            required(multi_process)
        } else {
            RequiredComponents::default()
        }
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if spec.features.prometheus_scrape.is_enabled() {
            required(false)
        } else {
            RequiredComponents::default()
        }
    }
}

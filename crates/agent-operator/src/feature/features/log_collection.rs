//! Collection of container logs by the node agent.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct LogCollectionFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(LogCollectionFeature)
}

impl Feature for LogCollectionFeature {
    fn id(&self) -> FeatureId {
        FeatureId::LogCollection
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.log_collection.is_enabled_or(false) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent([AgentContainerName::Agent], multi_process)
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec.features.log_collection.is_enabled() {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent([AgentContainerName::Agent], false)
    }
}

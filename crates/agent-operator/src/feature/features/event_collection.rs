//! Collection of Kubernetes events.
use crate::{
    cli::FeatureOptions,
    crd::{v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

/// Kubernetes events are collected by the cluster agent and forwarded through the node agents.
/// Without a cluster agent, the node agents elect a leader that collects them.
#[derive(Debug, Default)]
pub struct EventCollectionFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(EventCollectionFeature)
}

impl Feature for EventCollectionFeature {
    fn id(&self) -> FeatureId {
        FeatureId::EventCollection
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec
            .features
            .event_collection
            .collect_kubernetes_events
            .unwrap_or(false)
        {
            return RequiredComponents::default();
        }

        RequiredComponents::default()
            .with_cluster_agent()
            .with_node_agent([AgentContainerName::Agent], multi_process)
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        let mut required = RequiredComponents::default();
        if spec
            .cluster_agent
            .config
            .features
            .collect_events
            .unwrap_or(false)
        {
            required = required.with_cluster_agent();
        }
        if spec.agent.config.collect_events.unwrap_or(false) {
            required = required.with_node_agent([AgentContainerName::Agent], false);
        }
        required
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, false, false)]
    #[case(Some(true), None, true, false)]
    #[case(None, Some(true), false, true)]
    #[case(Some(true), Some(true), true, true)]
    fn v1alpha1_components(
        #[case] cluster_agent_collects: Option<bool>,
        #[case] node_agent_collects: Option<bool>,
        #[case] cluster_agent: bool,
        #[case] node_agent: bool,
    ) {
        let mut spec = v1alpha1::AgentDeploymentSpec::default();
        spec.cluster_agent.config.features.collect_events = cluster_agent_collects;
        spec.agent.config.collect_events = node_agent_collects;

        let required = EventCollectionFeature.configure_v1alpha1(&spec);
        assert_eq!(required.cluster_agent.is_enabled(), cluster_agent);
        assert_eq!(required.node_agent.is_enabled(), node_agent);
    }
}

//! Checks dispatched by the cluster agent, either to node agents or to dedicated runners.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct ClusterChecksFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(ClusterChecksFeature)
}

impl Feature for ClusterChecksFeature {
    fn id(&self) -> FeatureId {
        FeatureId::ClusterChecks
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        _multi_process: bool,
    ) -> RequiredComponents {
        let cluster_checks = &spec.features.cluster_checks;
        if !cluster_checks.is_enabled_or(true) {
            return RequiredComponents::default();
        }

        RequiredComponents::default()
            .with_cluster_agent()
            .with_cluster_checks_runner(cluster_checks.use_cluster_checks_runners.unwrap_or(false))
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec
            .cluster_agent
            .config
            .features
            .cluster_checks_enabled
            .unwrap_or(false)
        {
            return RequiredComponents::default();
        }

        RequiredComponents::default()
            .with_cluster_agent()
            .with_cluster_checks_runner(spec.cluster_checks_runner.is_enabled())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, Some(false))]
    #[case(Some(false), Some(false))]
    #[case(Some(true), Some(true))]
    fn runners(#[case] use_runners: Option<bool>, #[case] expected: Option<bool>) {
        let mut spec = v2alpha1::AgentDeploymentSpec::default();
        spec.features.cluster_checks.use_cluster_checks_runners = use_runners;

        let required = ClusterChecksFeature.configure(&spec, false);
        assert!(required.cluster_agent.is_enabled());
        assert_eq!(required.cluster_checks_runner.is_required, expected);
    }

    #[test]
    fn v1alpha1_runner_follows_component() {
        let mut spec = v1alpha1::AgentDeploymentSpec::default();
        spec.cluster_agent.config.features.cluster_checks_enabled = Some(true);
        spec.cluster_checks_runner.enabled = Some(true);

        let required = ClusterChecksFeature.configure_v1alpha1(&spec);
        assert!(required.cluster_agent.is_enabled());
        assert!(required.cluster_checks_runner.is_enabled());
    }
}

//! The kube-state-metrics check built into the agent.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct KubernetesStateCoreFeature {
    /// Run the check on the cluster checks runners instead of the cluster agent.
    pub cluster_check: bool,
}

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(KubernetesStateCoreFeature::default())
}

impl KubernetesStateCoreFeature {
    fn required(&self) -> RequiredComponents {
        let required = RequiredComponents::default().with_cluster_agent();
        if self.cluster_check {
            required.with_cluster_checks_runner(true)
        } else {
            required
        }
    }
}

impl Feature for KubernetesStateCoreFeature {
    fn id(&self) -> FeatureId {
        FeatureId::KubernetesStateCore
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        _multi_process: bool,
    ) -> RequiredComponents {
        let features = &spec.features;
        if !features.kube_state_metrics_core.is_enabled_or(true) {
            return RequiredComponents::default();
        }

        self.cluster_check = features.cluster_checks.is_enabled_or(true)
            && features
                .cluster_checks
                .use_cluster_checks_runners
                .unwrap_or(false);
        self.required()
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        let kube_state_metrics_core = &spec.features.kube_state_metrics_core;
        if !kube_state_metrics_core.is_enabled() {
            return RequiredComponents::default();
        }

        self.cluster_check = kube_state_metrics_core.cluster_check.unwrap_or(false);
        self.required()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, false)]
    #[case(None, Some(true), true)]
    #[case(Some(false), Some(true), false)]
    fn runs_on_runners(
        #[case] cluster_checks: Option<bool>,
        #[case] use_runners: Option<bool>,
        #[case] expected: bool,
    ) {
        let mut spec = v2alpha1::AgentDeploymentSpec::default();
        spec.features.cluster_checks.enabled = cluster_checks;
        spec.features.cluster_checks.use_cluster_checks_runners = use_runners;

        let mut feature = KubernetesStateCoreFeature::default();
        let required = feature.configure(&spec, false);
        assert!(required.cluster_agent.is_enabled());
        assert_eq!(required.cluster_checks_runner.is_enabled(), expected);
        assert_eq!(feature.cluster_check, expected);
    }
}

//! Mutating webhook served by the cluster agent, injecting configuration into application pods.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct AdmissionControllerFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(AdmissionControllerFeature)
}

impl Feature for AdmissionControllerFeature {
    fn id(&self) -> FeatureId {
        FeatureId::AdmissionController
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        _multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.admission_controller.is_enabled_or(true) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_cluster_agent()
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec
            .cluster_agent
            .config
            .features
            .admission_controller
            .is_enabled()
        {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_cluster_agent()
    }
}

//! Reports processes killed by the kernel OOM killer, traced by the system probe.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{AgentContainerName, Feature, FeatureId, RequiredComponents},
};

#[derive(Debug, Default)]
pub struct OomKillFeature;

pub(super) fn build(_options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(OomKillFeature)
}

const CONTAINERS: [AgentContainerName; 2] =
    [AgentContainerName::Agent, AgentContainerName::SystemProbe];

impl Feature for OomKillFeature {
    fn id(&self) -> FeatureId {
        FeatureId::OomKill
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.oom_kill.is_enabled_or(false) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent(CONTAINERS, multi_process)
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        let system_probe = &spec.agent.system_probe;
        if !system_probe.is_enabled() || !system_probe.enable_oom_kill.unwrap_or(false) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent(CONTAINERS, false)
    }
}

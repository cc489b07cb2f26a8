//! Live process collection.
use crate::{
    cli::FeatureOptions,
    crd::{Toggle, v1alpha1, v2alpha1},
    feature::{Feature, FeatureId, RequiredComponents, features::process_check_containers},
};

#[derive(Debug, Default)]
pub struct ProcessFeature {
    pub run_in_core_agent: bool,
}

pub(super) fn build(options: &FeatureOptions) -> Box<dyn Feature> {
    Box::new(ProcessFeature {
        run_in_core_agent: options.run_process_checks_in_core_agent,
    })
}

impl Feature for ProcessFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Process
    }

    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents {
        if !spec.features.process.is_enabled_or(false) {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent(
            process_check_containers(self.run_in_core_agent).iter().copied(),
            multi_process,
        )
    }

    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents {
        if !spec.agent.process.is_enabled() {
            return RequiredComponents::default();
        }
        RequiredComponents::default().with_node_agent(
            process_check_containers(self.run_in_core_agent).iter().copied(),
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::rstest;

    use super::*;
    use crate::feature::AgentContainerName;

    #[rstest]
    #[case(false, &[AgentContainerName::Agent, AgentContainerName::ProcessAgent])]
    #[case(true, &[AgentContainerName::Agent])]
    fn process_agent_container(
        #[case] run_process_checks_in_core_agent: bool,
        #[case] expected: &[AgentContainerName],
    ) {
        let mut spec = v1alpha1::AgentDeploymentSpec::default();
        spec.agent.process.enabled = Some(true);

        let mut feature = build(&FeatureOptions {
            run_process_checks_in_core_agent,
        });
        let required = feature.configure_v1alpha1(&spec);
        assert_eq!(
            required.node_agent.containers,
            expected.iter().copied().collect::<BTreeSet<_>>()
        );
    }
}

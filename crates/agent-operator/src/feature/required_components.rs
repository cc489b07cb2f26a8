use std::collections::BTreeSet;

use crate::feature::{AgentContainerName, ComponentKind};

/// What the features require from a single component.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequiredComponent {
    /// `None` if no feature expressed an opinion.
    pub is_required: Option<bool>,

    /// Whether the component runs privileged containers.
    pub privileged: bool,

    pub containers: BTreeSet<AgentContainerName>,
}

impl RequiredComponent {
    pub fn required() -> Self {
        Self {
            is_required: Some(true),
            ..Self::default()
        }
    }

    pub fn not_required() -> Self {
        Self {
            is_required: Some(false),
            ..Self::default()
        }
    }

    /// A node agent running `containers`.
    ///
    /// With the multi-process container, all unprivileged processes share the
    /// [`AgentContainerName::UnprivilegedSingleAgent`] container.
    pub fn node_agent(
        containers: impl IntoIterator<Item = AgentContainerName>,
        multi_process: bool,
    ) -> Self {
        Self::required().with_containers(containers.into_iter().map(|container| {
            if multi_process && !container.is_privileged() {
                AgentContainerName::UnprivilegedSingleAgent
            } else {
                container
            }
        }))
    }

    /// Adds `containers`, marking the component privileged if any of them is.
    pub fn with_containers(
        mut self,
        containers: impl IntoIterator<Item = AgentContainerName>,
    ) -> Self {
        for container in containers {
            self.privileged |= container.is_privileged();
            self.containers.insert(container);
        }
        self
    }

    /// Whether any feature needs the component.
    pub fn is_enabled(&self) -> bool {
        self.is_required == Some(true)
    }

    /// Whether any feature expressed an opinion about the component.
    pub fn is_configured(&self) -> bool {
        self.is_required.is_some()
    }

    /// Merges the requirements of another feature.
    ///
    /// A component is required as soon as one feature requires it, and only left unspecified if no
    /// feature said anything about it.
    pub fn merge(&mut self, other: &Self) {
        self.is_required = match (self.is_required, other.is_required) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), _) | (_, Some(false)) => Some(false),
            (None, None) => None,
        };
        self.privileged |= other.privileged;
        self.containers.extend(other.containers.iter().copied());
    }
}

/// The merged requirements of all features, per component.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequiredComponents {
    pub node_agent: RequiredComponent,
    pub cluster_agent: RequiredComponent,
    pub cluster_checks_runner: RequiredComponent,
}

impl RequiredComponents {
    pub fn with_node_agent(
        mut self,
        containers: impl IntoIterator<Item = AgentContainerName>,
        multi_process: bool,
    ) -> Self {
        self.node_agent = RequiredComponent::node_agent(containers, multi_process);
        self
    }

    pub fn with_cluster_agent(mut self) -> Self {
        self.cluster_agent =
            RequiredComponent::required().with_containers([AgentContainerName::ClusterAgent]);
        self
    }

    /// Requires the cluster checks runner, or explicitly rules it out.
    pub fn with_cluster_checks_runner(mut self, required: bool) -> Self {
        self.cluster_checks_runner = if required {
            RequiredComponent::required().with_containers([AgentContainerName::ClusterChecksRunner])
        } else {
            RequiredComponent::not_required()
        };
        self
    }

    pub fn component(&self, kind: ComponentKind) -> &RequiredComponent {
        match kind {
            ComponentKind::NodeAgent => &self.node_agent,
            ComponentKind::ClusterAgent => &self.cluster_agent,
            ComponentKind::ClusterChecksRunner => &self.cluster_checks_runner,
        }
    }

    /// Whether any component is required.
    pub fn is_enabled(&self) -> bool {
        self.components().any(RequiredComponent::is_enabled)
    }

    /// Whether an opinion was expressed about any component.
    pub fn is_configured(&self) -> bool {
        self.components().any(RequiredComponent::is_configured)
    }

    pub fn merge(&mut self, other: &Self) {
        self.node_agent.merge(&other.node_agent);
        self.cluster_agent.merge(&other.cluster_agent);
        self.cluster_checks_runner.merge(&other.cluster_checks_runner);
    }

    fn components(&self) -> impl Iterator<Item = &RequiredComponent> {
        [
            &self.node_agent,
            &self.cluster_agent,
            &self.cluster_checks_runner,
        ]
        .into_iter()
    }
}

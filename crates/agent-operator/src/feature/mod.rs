//! Monitoring capabilities and the components they need.
//!
//! Every capability (APM, log collection, runtime security, ...) is a [`Feature`]. Given the
//! desired state, a feature decides whether it is enabled and which components (and containers on
//! them) it needs, as [`RequiredComponents`]. The [`FeatureRegistry`] resolves all registered
//! features in a deterministic order and merges their requirements.
use std::{cmp::Ordering, fmt::Debug};

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    cli::FeatureOptions,
    crd::{v1alpha1, v2alpha1},
};

pub mod features;
pub mod registry;
pub mod required_components;

pub use registry::FeatureRegistry;
pub use required_components::{RequiredComponent, RequiredComponents};

/// A monitoring capability.
///
/// A fresh instance is built for every resolution, so implementations may keep whatever they
/// resolved while configuring themselves.
pub trait Feature: Debug {
    fn id(&self) -> FeatureId;

    /// Returns the components needed for `spec`.
    ///
    /// `multi_process` is set if the unprivileged agent processes of the node agent share a single
    /// container. A disabled feature returns [`RequiredComponents::default`].
    fn configure(
        &mut self,
        spec: &v2alpha1::AgentDeploymentSpec,
        multi_process: bool,
    ) -> RequiredComponents;

    /// Returns the components needed for a `v1alpha1` spec, which is expected to be defaulted.
    fn configure_v1alpha1(&mut self, spec: &v1alpha1::AgentDeploymentSpec) -> RequiredComponents;
}

/// Builds a [`Feature`] for a single resolution.
pub type BuildFn = fn(&FeatureOptions) -> Box<dyn Feature>;

/// Identifies a [`Feature`].
///
/// Features are ordered by their identifier string, which keeps the resolution order stable no
/// matter how the enum is laid out.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureId {
    AdmissionController,
    Apm,
    ClusterChecks,
    /// Cloud security posture management.
    Compliance,
    EbpfCheck,
    EventCollection,
    ExternalMetrics,
    KubernetesStateCore,
    LogCollection,
    NetworkMonitoring,
    OomKill,
    OrchestratorExplorer,
    Process,
    PrometheusScrape,
    /// Cloud workload security.
    RuntimeSecurity,
    /// Universal service monitoring.
    ServiceMonitoring,
    TcpQueueLength,
}

impl FeatureId {
    /// Features that need elevated privileges on the host.
    pub const PRIVILEGED: [Self; 6] = [
        Self::EbpfCheck,
        Self::RuntimeSecurity,
        Self::Compliance,
        Self::OomKill,
        Self::TcpQueueLength,
        Self::ServiceMonitoring,
    ];

    pub fn is_privileged(self) -> bool {
        Self::PRIVILEGED.contains(&self)
    }
}

impl Ord for FeatureId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_ref().cmp(other.as_ref())
    }
}

impl PartialOrd for FeatureId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The workloads making up an agent deployment.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[strum(serialize_all = "kebab-case")]
pub enum ComponentKind {
    /// The daemonset running on every node.
    NodeAgent,
    ClusterAgent,
    ClusterChecksRunner,
}

/// Containers of the agent workloads.
#[derive(
    AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[strum(serialize_all = "kebab-case")]
pub enum AgentContainerName {
    Agent,
    TraceAgent,
    ProcessAgent,
    SystemProbe,
    SecurityAgent,
    /// Runs all unprivileged node agent processes when the multi-process container is used.
    UnprivilegedSingleAgent,
    ClusterAgent,
    ClusterChecksRunner,
}

impl AgentContainerName {
    /// Whether the container needs elevated privileges on the host.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::SystemProbe | Self::SecurityAgent)
    }
}

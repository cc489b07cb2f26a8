use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::{
    config::merge::{Atomic, Merge},
    crd::{
        common::{ContainerConfig, ImageConfig, NetworkPolicySpec, RbacConfig},
        impl_toggle,
    },
    rollout::CanaryStrategy,
    time::Duration,
};

/// The node agent, deployed as a daemonset on every node of the cluster.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct NodeAgentSpec {
    /// Whether the node agent is deployed. Defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Deploy the agent with an extended daemonset, which supports canary rollouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_extended_daemonset: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub image: ImageConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub config: NodeAgentConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub rbac: RbacConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub deployment_strategy: DaemonSetDeploymentStrategy,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub apm: ApmSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub system_probe: SystemProbeSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub security: SecuritySpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub process: ProcessSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub network_policy: NetworkPolicySpec,
}

/// Settings of the core agent container.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct NodeAgentConfig {
    #[serde(flatten)]
    pub container: ContainerConfig,

    /// Collect Kubernetes events from the node agent. Only used without a cluster agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_events: Option<bool>,

    /// Enables leader election between node agents, required for event collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_election: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub cri_socket: CriSocketConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub dogstatsd: DogstatsdConfig,

    /// Static tags attached to every metric, event and service check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_labels_as_tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_annotations_as_tags: Option<BTreeMap<String, String>>,
}

/// Where the container runtime socket lives on the host.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct CriSocketConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_socket_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cri_socket_path: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct DogstatsdConfig {
    /// Tag metrics received over the UDS socket with the container they originate from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_detection: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub unix_domain_socket: UnixDomainSocketSpec,
}

/// A unix domain socket shared with the host through a hostPath volume.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct UnixDomainSocketSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Path of the socket on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_filepath: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetDeploymentStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_strategy_type: Option<UpdateStrategyType>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub rolling_update: DaemonSetRollingUpdate,

    /// Only used with the extended daemonset.
    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub canary: CanaryStrategy,

    /// How often the extended daemonset controller reconciles the rollout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconcile_frequency: Option<Duration>,
}

#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize,
)]
pub enum UpdateStrategyType {
    #[default]
    RollingUpdate,
    OnDelete,
}

impl Atomic for UpdateStrategyType {}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetRollingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pod_scheduler_failure: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_pod_creation: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_start_interval_duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_start_additive_increase: Option<IntOrString>,
}

/// The trace agent.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ApmSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Host port the trace agent listens on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i32>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub unix_domain_socket: UnixDomainSocketSpec,

    #[serde(flatten)]
    pub container: ContainerConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct SystemProbeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_oom_kill: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_tcp_queue_length: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpf_debug_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_dns_stats: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conntrack_enabled: Option<bool>,

    /// Directory on the host holding the seccomp profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_root_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_profile_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_armor_profile_name: Option<String>,
}

/// The security agent.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct SecuritySpec {
    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub compliance: ComplianceSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub runtime: RuntimeSecuritySpec,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSecuritySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub syscall_monitor: SyscallMonitorSpec,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct SyscallMonitorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// The process agent.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    /// Runs the process agent. Without process collection only live containers are collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_collection_enabled: Option<bool>,
}

impl_toggle!(
    NodeAgentSpec,
    UnixDomainSocketSpec,
    ApmSpec,
    SystemProbeSpec,
    ComplianceSpec,
    RuntimeSecuritySpec,
    SyscallMonitorSpec,
    ProcessSpec,
);

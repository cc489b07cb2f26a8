use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::merge::Merge,
    crd::{
        common::{ContainerConfig, ImageConfig, NetworkPolicySpec, RbacConfig},
        impl_toggle,
    },
};

/// The cluster agent, a single deployment acting as a proxy between the node agents and the
/// Kubernetes API server.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ClusterAgentSpec {
    /// Whether the cluster agent is deployed. Defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub image: ImageConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub config: ClusterAgentConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub rbac: RbacConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub network_policy: NetworkPolicySpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ClusterAgentConfig {
    #[serde(flatten)]
    pub container: ContainerConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub features: ClusterAgentFeatures,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ClusterAgentFeatures {
    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub external_metrics: ExternalMetricsConfig,

    /// Dispatch cluster checks to the node agents (or the cluster checks runners).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_checks_enabled: Option<bool>,

    /// Collect Kubernetes events from the cluster agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_events: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub admission_controller: AdmissionControllerConfig,
}

/// Serves custom metrics to horizontal pod autoscalers.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ExternalMetricsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Port of the external metrics provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_metrics_queries: Option<bool>,
}

/// A mutating webhook injecting configuration into application pods.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct AdmissionControllerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Also mutate pods that do not carry the admission label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutate_unlabelled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl_toggle!(ClusterAgentSpec, ExternalMetricsConfig, AdmissionControllerConfig);

//! The feature-centric `v2alpha1` API of the [`AgentDeployment`] custom resource.
//!
//! Instead of configuring each component, users switch capabilities on and off and the operator
//! works out which components have to run. Unset switches fall back to a per-feature default.
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::crd::impl_toggle;

#[derive(Clone, CustomResource, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "agents.monitoring.io",
    version = "v2alpha1",
    kind = "AgentDeployment",
    plural = "agentdeployments",
    shortname = "agentdeploy",
    namespaced,
    crates(
        kube_core = "kube::core",
        k8s_openapi = "k8s_openapi",
        schemars = "schemars"
    )
)]
#[serde(rename_all = "camelCase")]
pub struct AgentDeploymentSpec {
    #[serde(default)]
    pub features: FeaturesSpec,

    #[serde(default)]
    pub global: GlobalConfig,
}

/// Settings applied to every component.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    #[serde(default)]
    pub container_process_model: ContainerProcessModel,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProcessModel {
    /// Run all unprivileged agent processes in a single container to save resources.
    ///
    /// Ignored as soon as a feature needs a privileged container on the node agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_multi_process_container: Option<bool>,
}

impl AgentDeploymentSpec {
    pub fn use_multi_process_container(&self) -> bool {
        self.global
            .container_process_model
            .use_multi_process_container
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesSpec {
    #[serde(default)]
    pub admission_controller: FeatureToggle,

    #[serde(default)]
    pub apm: FeatureToggle,

    #[serde(default)]
    pub cluster_checks: ClusterChecksFeatureConfig,

    /// Cloud security posture management.
    #[serde(default)]
    pub compliance: FeatureToggle,

    #[serde(default)]
    pub ebpf_check: FeatureToggle,

    #[serde(default)]
    pub event_collection: EventCollectionFeatureConfig,

    #[serde(default)]
    pub external_metrics_server: FeatureToggle,

    #[serde(default)]
    pub kube_state_metrics_core: FeatureToggle,

    #[serde(default)]
    pub log_collection: LogCollectionFeatureConfig,

    #[serde(default)]
    pub network_monitoring: FeatureToggle,

    #[serde(default)]
    pub oom_kill: FeatureToggle,

    #[serde(default)]
    pub orchestrator_explorer: FeatureToggle,

    /// Live process collection.
    #[serde(default)]
    pub process: FeatureToggle,

    #[serde(default)]
    pub prometheus_scrape: FeatureToggle,

    /// Cloud workload security.
    #[serde(default)]
    pub runtime_security: FeatureToggle,

    /// Universal service monitoring.
    #[serde(default)]
    pub service_monitoring: FeatureToggle,

    #[serde(default)]
    pub tcp_queue_length: FeatureToggle,
}

/// A feature that has nothing to configure besides being switched on or off.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureToggle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl FeatureToggle {
    pub const fn on() -> Self {
        Self {
            enabled: Some(true),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterChecksFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Dispatch cluster checks to dedicated runners instead of the node agents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cluster_checks_runners: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCollectionFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_kubernetes_events: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogCollectionFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_collect_all: Option<bool>,
}

impl_toggle!(FeatureToggle, ClusterChecksFeatureConfig, LogCollectionFeatureConfig);

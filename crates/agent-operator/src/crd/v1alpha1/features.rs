use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{config::merge::Merge, crd::impl_toggle};

/// Cluster-wide capabilities that span several components.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct FeaturesSpec {
    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub orchestrator_explorer: OrchestratorExplorerConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub kube_state_metrics_core: KubeStateMetricsCoreConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub prometheus_scrape: PrometheusScrapeConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub log_collection: LogCollectionConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub network_monitoring: NetworkMonitoringConfig,
}

/// Collects the state of Kubernetes resources for the orchestrator explorer.
///
/// Enabling it forces the process agent on.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorExplorerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Run the check as a cluster check instead of in the cluster agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_check: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub scrubbing: ScrubbingConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ScrubbingConfig {
    /// Scrub sensitive values from container specs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<bool>,
}

/// The kube-state-metrics check built into the agent.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct KubeStateMetricsCoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_check: Option<bool>,
}

/// Autodiscovery of Prometheus endpoints through pod annotations.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct PrometheusScrapeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Also scrape services, not only pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_endpoints: Option<bool>,

    /// Additional check configurations, as YAML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_configs: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct LogCollectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Collect the logs of every container, not only annotated ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_config_container_collect_all: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_collect_using_files: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_logs_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_logs_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_symlinks_path: Option<String>,

    /// Where the agent keeps track of the log files it already tailed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_storage_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_files_limit: Option<i32>,
}

/// Network performance monitoring. Enabling it forces the system probe on.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct NetworkMonitoringConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl_toggle!(
    OrchestratorExplorerConfig,
    KubeStateMetricsCoreConfig,
    PrometheusScrapeConfig,
    LogCollectionConfig,
    NetworkMonitoringConfig,
);

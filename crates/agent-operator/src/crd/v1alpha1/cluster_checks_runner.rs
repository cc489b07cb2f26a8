use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::merge::Merge,
    crd::{
        common::{ContainerConfig, ImageConfig, NetworkPolicySpec, RbacConfig},
        impl_toggle,
    },
};

/// Agents dedicated to running cluster checks dispatched by the cluster agent.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ClusterChecksRunnerSpec {
    /// Whether the cluster checks runners are deployed.
    ///
    /// Defaults to `false`, unless any other field of this block is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub image: ImageConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub config: ContainerConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub rbac: RbacConfig,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub network_policy: NetworkPolicySpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

impl_toggle!(ClusterChecksRunnerSpec);

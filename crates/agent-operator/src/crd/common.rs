//! Building blocks shared by the node agent, the cluster agent and the cluster checks runner.
use k8s_openapi::api::core::v1::{LocalObjectReference, Probe, ResourceRequirements};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::{
    config::merge::{Atomic, Merge},
    utils::version::tag_from_image_name,
};

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Name of the image, optionally including a registry and a tag,
    /// e.g. `agent` or `gcr.io/datadoghq/agent:7.28.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tag of the image. Ignored if [`Self::name`] already carries a tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// [Pull policy](https://kubernetes.io/docs/concepts/containers/images/#image-pull-policy) used when pulling the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_policy: Option<PullPolicy>,

    /// [Image pull secrets](https://kubernetes.io/docs/concepts/containers/images/#specifying-imagepullsecrets-on-a-pod) to pull images from a private registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_secrets: Option<Vec<LocalObjectReference>>,
}

impl ImageConfig {
    /// The tag the image will actually be pulled with.
    pub fn resolved_tag(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(tag_from_image_name)
            .or(self.tag.as_deref())
    }
}

#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize,
)]
pub enum PullPolicy {
    #[default]
    IfNotPresent,
    Always,
    Never,
}

impl Atomic for PullPolicy {}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct RbacConfig {
    /// Whether RBAC resources (service account, cluster role and binding) should be created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,

    /// Use an existing service account instead of creating one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicySpec {
    /// Whether a network policy restricting the traffic of the component should be created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
}

/// Settings of a single agent container.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfig {
    /// Log level of the agent process, e.g. `INFO` or `DEBUG`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    /// Port serving the health endpoints used by the probes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_port: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("agent"), Some("7.28.0"), Some("7.28.0"))]
    #[case(Some("agent:7.30.0"), Some("7.28.0"), Some("7.30.0"))]
    #[case(Some("registry:5000/agent"), Some("7.28.0"), Some("7.28.0"))]
    #[case(None, None, None)]
    fn resolved_tag(
        #[case] name: Option<&str>,
        #[case] tag: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let image = ImageConfig {
            name: name.map(str::to_owned),
            tag: tag.map(str::to_owned),
            ..ImageConfig::default()
        };
        assert_eq!(image.resolved_tag(), expected);
    }
}

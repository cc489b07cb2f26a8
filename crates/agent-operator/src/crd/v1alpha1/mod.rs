//! The component-centric `v1alpha1` API of the [`AgentDeployment`] custom resource.
//!
//! ```
//! # use agent_operator::crd::v1alpha1::AgentDeploymentSpec;
//! let spec: AgentDeploymentSpec = serde_yaml::from_str(
//!     "
//!     agent:
//!       image:
//!         name: agent:7.30.0
//!       apm:
//!         enabled: true
//!     features:
//!       logCollection:
//!         enabled: true
//!     ",
//! )
//! .unwrap();
//! assert_eq!(spec.agent.apm.enabled, Some(true));
//! ```
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{config::merge::Merge, defaults};

mod agent;
mod cluster_agent;
mod cluster_checks_runner;
mod features;

pub use agent::*;
pub use cluster_agent::*;
pub use cluster_checks_runner::*;
pub use features::*;

#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[kube(
    group = "agents.monitoring.io",
    version = "v1alpha1",
    kind = "AgentDeployment",
    plural = "agentdeployments",
    shortname = "agentdeploy",
    status = "AgentDeploymentStatus",
    namespaced,
    crates(
        kube_core = "kube::core",
        k8s_openapi = "k8s_openapi",
        schemars = "schemars"
    )
)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct AgentDeploymentSpec {
    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub agent: NodeAgentSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub cluster_agent: ClusterAgentSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub cluster_checks_runner: ClusterChecksRunnerSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub features: FeaturesSpec,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub credentials: CredentialsSpec,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct CredentialsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,

    /// Token shared between the node agents and the cluster agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Resolve `ENC[...]` handles in the credentials with the secret backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_secret_backend: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDeploymentStatus {
    /// Every value the operator filled in because it was missing from the spec.
    #[serde(default)]
    pub default_override: AgentDeploymentSpec,
}

impl AgentDeployment {
    /// Defaults the spec in place and publishes the filled-in values in the status.
    ///
    /// The rest of the status is left untouched.
    pub fn apply_defaults(&mut self) -> &AgentDeploymentStatus {
        let default_override = defaults::default_agent_deployment(&mut self.spec);
        let status = self.status.get_or_insert_with(AgentDeploymentStatus::default);
        status.default_override = default_override;
        status
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn apply_defaults_publishes_status() {
        let mut deployment: AgentDeployment = serde_yaml::from_str(indoc! {"
            apiVersion: agents.monitoring.io/v1alpha1
            kind: AgentDeployment
            metadata:
              name: agents
              namespace: monitoring
            spec:
              agent:
                image:
                  tag: 7.30.0
        "})
        .expect("valid AgentDeployment");

        let status = deployment.apply_defaults().clone();
        assert_eq!(status.default_override.agent.image.tag, None);
        assert_eq!(
            status.default_override.agent.image.name.as_deref(),
            Some("agent")
        );
        assert_eq!(deployment.spec.agent.image.tag.as_deref(), Some("7.30.0"));

        // Defaulting twice does not report anything new.
        let status = deployment.apply_defaults();
        assert!(status.default_override.is_unset());
    }

    #[test]
    fn status_omits_untouched_fields() {
        let status = AgentDeploymentStatus {
            default_override: AgentDeploymentSpec {
                credentials: CredentialsSpec {
                    use_secret_backend: Some(false),
                    ..CredentialsSpec::default()
                },
                ..AgentDeploymentSpec::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&status).expect("serializable status"),
            serde_json::json!({
                "defaultOverride": {
                    "credentials": {
                        "useSecretBackend": false,
                    },
                },
            })
        );
    }
}

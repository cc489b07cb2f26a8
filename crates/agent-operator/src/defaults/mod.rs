//! The defaulting pass for the `v1alpha1` [`AgentDeploymentSpec`].
//!
//! Every missing value of a user-supplied spec is filled in, and every value that was filled in is
//! recorded in the *override shadow*, which is published in the status of the custom resource.
//!
//! The pass runs in three steps:
//!
//! 1. The feature switches are defaulted.
//! 2. [`feature_override`] switches on the node agent subtrees that the enabled features depend on.
//! 3. Every component is defaulted on its own. Most subtrees are plain [`Merge`]s with a tree of
//!    constants, subtrees with an `enabled` switch go through [`default_toggled`].
//!
//! ```
//! # use agent_operator::{crd::v1alpha1::AgentDeploymentSpec, defaults};
//! let defaults::Defaulted { effective, overrides } = defaults::resolve(AgentDeploymentSpec::default());
//!
//! assert_eq!(effective.agent.enabled, Some(true));
//! assert_eq!(effective.agent.image.name.as_deref(), Some("agent"));
//! assert_eq!(overrides.agent.image.name.as_deref(), Some("agent"));
//! assert_eq!(effective.cluster_checks_runner.enabled, Some(false));
//! ```
use tracing::{debug, warn};

use crate::{
    config::merge::Merge,
    crd::{
        Toggle,
        common::{ImageConfig, NetworkPolicySpec, PullPolicy, RbacConfig},
        v1alpha1::{AgentDeploymentSpec, CredentialsSpec, FeaturesSpec},
    },
    time::Duration,
};

mod agent;
mod cluster_agent;
mod cluster_checks_runner;
mod features;

pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_HEALTH_PORT: i32 = 5555;
pub const DEFAULT_IMAGE_PULL_POLICY: PullPolicy = PullPolicy::IfNotPresent;

pub const DEFAULT_AGENT_IMAGE_NAME: &str = "agent";
pub const DEFAULT_AGENT_IMAGE_TAG: &str = "7.28.0";
pub const DEFAULT_CLUSTER_AGENT_IMAGE_NAME: &str = "cluster-agent";
pub const DEFAULT_CLUSTER_AGENT_IMAGE_TAG: &str = "1.12.0";

pub const DEFAULT_LIVENESS_PROBE_PATH: &str = "/live";
pub const DEFAULT_READINESS_PROBE_PATH: &str = "/ready";
pub const DEFAULT_PROBE_INITIAL_DELAY_SECONDS: i32 = 15;
pub const DEFAULT_PROBE_PERIOD_SECONDS: i32 = 15;
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: i32 = 5;
pub const DEFAULT_PROBE_SUCCESS_THRESHOLD: i32 = 1;
pub const DEFAULT_PROBE_FAILURE_THRESHOLD: i32 = 6;

pub const DEFAULT_ROLLING_UPDATE_MAX_UNAVAILABLE: &str = "10%";
pub const DEFAULT_ROLLING_UPDATE_MAX_POD_SCHEDULER_FAILURE: &str = "10%";
pub const DEFAULT_ROLLING_UPDATE_MAX_PARALLEL_POD_CREATION: i32 = 250;
pub const DEFAULT_ROLLING_UPDATE_SLOW_START_INTERVAL: Duration = Duration::from_minutes(1);
pub const DEFAULT_ROLLING_UPDATE_SLOW_START_ADDITIVE_INCREASE: &str = "5";
pub const DEFAULT_RECONCILE_FREQUENCY: Duration = Duration::from_secs(10);

pub const DEFAULT_DOCKER_SOCKET_PATH: &str = "/var/run/docker.sock";
pub const DEFAULT_DOGSTATSD_SOCKET_PATH: &str = "/var/run/datadog/statsd.sock";
pub const DEFAULT_APM_SOCKET_PATH: &str = "/var/run/datadog/apm.sock";
pub const DEFAULT_APM_HOST_PORT: i32 = 8126;

pub const DEFAULT_SECCOMP_ROOT_PATH: &str = "/var/lib/kubelet/seccomp";
pub const DEFAULT_SECCOMP_PROFILE_NAME: &str = "localhost/system-probe";
pub const DEFAULT_APP_ARMOR_PROFILE_NAME: &str = "unconfined";

pub const DEFAULT_EXTERNAL_METRICS_PORT: i32 = 8443;
pub const DEFAULT_ADMISSION_SERVICE_NAME: &str = "datadog-admission-controller";

pub const DEFAULT_CONTAINER_LOGS_PATH: &str = "/var/lib/docker/containers";
pub const DEFAULT_POD_LOGS_PATH: &str = "/var/log/pods";
pub const DEFAULT_CONTAINER_SYMLINKS_PATH: &str = "/var/log/containers";
pub const DEFAULT_LOGS_TEMP_STORAGE_PATH: &str = "/var/lib/datadog-agent/logs";
pub const DEFAULT_LOGS_OPEN_FILES_LIMIT: i32 = 100;

/// A defaulted spec, together with the values the defaulting pass filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaulted {
    /// The spec with every missing value filled in.
    pub effective: AgentDeploymentSpec,

    /// Exactly the values that were missing, see [`Merge::merge_tracked`].
    pub overrides: AgentDeploymentSpec,
}

/// Defaults `spec`, consuming it.
pub fn resolve(mut spec: AgentDeploymentSpec) -> Defaulted {
    let overrides = default_agent_deployment(&mut spec);
    Defaulted {
        effective: spec,
        overrides,
    }
}

/// Defaults `spec` in place, returning the override shadow.
///
/// Running it again on the result is a no-op that returns an unset shadow.
pub fn default_agent_deployment(spec: &mut AgentDeploymentSpec) -> AgentDeploymentSpec {
    // Decided up front, since the cluster checks runner is defaulted after the features.
    let cluster_checks_runner = &spec.cluster_checks_runner;
    let cluster_checks_runner_enabled =
        cluster_checks_runner.is_enabled_or(!cluster_checks_runner.is_unset());

    let mut shadow = AgentDeploymentSpec {
        features: features::default_features(&mut spec.features, cluster_checks_runner_enabled),
        ..AgentDeploymentSpec::default()
    };
    // Looks at the defaulted feature switches, so that features enabled by default force their
    // dependencies too.
    shadow.merge(&feature_override(spec));

    let defaulted = AgentDeploymentSpec {
        features: FeaturesSpec::default(),
        cluster_agent: cluster_agent::default_cluster_agent(&mut spec.cluster_agent),
        agent: agent::default_node_agent(&mut spec.agent),
        cluster_checks_runner: cluster_checks_runner::default_cluster_checks_runner(
            &mut spec.cluster_checks_runner,
        ),
        credentials: spec.credentials.merge_tracked(&CredentialsSpec {
            use_secret_backend: Some(false),
            ..CredentialsSpec::default()
        }),
    };
    shadow.merge(&defaulted);

    debug!(
        defaulted_anything = !shadow.is_unset(),
        "applied defaults to agent deployment"
    );
    shadow
}

/// Switches on the node agent subtrees that enabled features depend on:
///
/// - network monitoring needs the system probe,
/// - the orchestrator explorer needs the process agent.
///
/// A subtree the user disabled explicitly is switched on anyway, since the feature could not work
/// without it. The forced subtree receives the rest of its defaults in the regular component pass.
/// Nothing is forced if the node agent itself is disabled, as none of its subtrees are deployed.
pub fn feature_override(spec: &mut AgentDeploymentSpec) -> AgentDeploymentSpec {
    let mut shadow = AgentDeploymentSpec::default();
    if spec.agent.enabled == Some(false) {
        return shadow;
    }

    if spec.features.network_monitoring.is_enabled() {
        shadow.agent.system_probe.enabled = force_enabled(
            &mut spec.agent.system_probe,
            "networkMonitoring",
            "agent.systemProbe",
        );
    }
    if spec.features.orchestrator_explorer.is_enabled() {
        shadow.agent.process.enabled = force_enabled(
            &mut spec.agent.process,
            "orchestratorExplorer",
            "agent.process",
        );
    }
    shadow
}

/// Returns the forced value if the switch had to be flipped.
fn force_enabled<T: Toggle>(subtree: &mut T, feature: &str, path: &str) -> Option<bool> {
    match subtree.enabled() {
        Some(true) => None,
        enabled => {
            if enabled == Some(false) {
                warn!(
                    feature,
                    subtree = path,
                    "feature depends on {path}, enabling it although it is explicitly disabled"
                );
            }
            *subtree.enabled_mut() = Some(true);
            Some(true)
        }
    }
}

/// Defaults a subtree that is switched on and off as a whole.
///
/// The switch is defaulted to `enabled_by_default` first. Only if the subtree ends up enabled,
/// `default_enabled` is called to default the rest of it, returning the shadow of what it filled.
pub fn default_toggled<T>(
    node: &mut T,
    enabled_by_default: bool,
    default_enabled: impl FnOnce(&mut T) -> T,
) -> T
where
    T: Toggle + Merge + Default,
{
    let mut shadow = T::default();
    *shadow.enabled_mut() = node.enabled_mut().merge_tracked(&Some(enabled_by_default));

    if node.is_enabled() {
        shadow.merge(&default_enabled(node));
    }
    shadow
}

fn default_image(name: &str, tag: &str) -> ImageConfig {
    ImageConfig {
        name: Some(name.to_owned()),
        tag: Some(tag.to_owned()),
        pull_policy: Some(DEFAULT_IMAGE_PULL_POLICY),
        pull_secrets: None,
    }
}

fn default_rbac() -> RbacConfig {
    RbacConfig {
        create: Some(true),
        service_account_name: None,
    }
}

fn default_network_policy() -> NetworkPolicySpec {
    NetworkPolicySpec {
        create: Some(false),
    }
}

use k8s_openapi::{
    api::core::v1::{HTTPGetAction, Probe, TCPSocketAction},
    apimachinery::pkg::util::intstr::IntOrString,
};
use tracing::trace;

use super::*;
use crate::{
    crd::{
        common::ContainerConfig,
        v1alpha1::{
            ApmSpec, ComplianceSpec, CriSocketConfig, DaemonSetDeploymentStrategy,
            DaemonSetRollingUpdate, DogstatsdConfig, NodeAgentConfig, NodeAgentSpec, ProcessSpec,
            RuntimeSecuritySpec, SecuritySpec, SyscallMonitorSpec, SystemProbeSpec,
            UnixDomainSocketSpec, UpdateStrategyType,
        },
    },
    rollout::CanaryStrategy,
    utils::version::is_above_min_version,
};

pub(super) fn default_node_agent(agent: &mut NodeAgentSpec) -> NodeAgentSpec {
    default_toggled(agent, true, |agent| NodeAgentSpec {
        use_extended_daemonset: agent.use_extended_daemonset.merge_tracked(&Some(false)),
        image: agent.image.merge_tracked(&default_image(
            DEFAULT_AGENT_IMAGE_NAME,
            DEFAULT_AGENT_IMAGE_TAG,
        )),
        config: default_node_agent_config(&mut agent.config, &agent.image),
        rbac: agent.rbac.merge_tracked(&default_rbac()),
        deployment_strategy: agent
            .deployment_strategy
            .merge_tracked(&default_deployment_strategy()),
        apm: default_apm(&mut agent.apm),
        system_probe: default_toggled(&mut agent.system_probe, false, |system_probe| {
            system_probe.merge_tracked(&SystemProbeSpec {
                enabled: None,
                enable_oom_kill: Some(false),
                enable_tcp_queue_length: Some(false),
                bpf_debug_enabled: Some(false),
                collect_dns_stats: Some(false),
                conntrack_enabled: Some(false),
                seccomp_root_path: Some(DEFAULT_SECCOMP_ROOT_PATH.to_owned()),
                seccomp_profile_name: Some(DEFAULT_SECCOMP_PROFILE_NAME.to_owned()),
                app_armor_profile_name: Some(DEFAULT_APP_ARMOR_PROFILE_NAME.to_owned()),
            })
        }),
        security: agent.security.merge_tracked(&SecuritySpec {
            compliance: ComplianceSpec {
                enabled: Some(false),
            },
            runtime: RuntimeSecuritySpec {
                enabled: Some(false),
                syscall_monitor: SyscallMonitorSpec {
                    enabled: Some(false),
                },
            },
        }),
        process: default_toggled(&mut agent.process, false, |process| {
            process.merge_tracked(&ProcessSpec {
                enabled: None,
                process_collection_enabled: Some(false),
            })
        }),
        network_policy: agent.network_policy.merge_tracked(&default_network_policy()),
        enabled: None,
    })
}

/// The image has to be defaulted before, so that the version it resolves to is known.
fn default_node_agent_config(config: &mut NodeAgentConfig, image: &ImageConfig) -> NodeAgentConfig {
    let mut shadow = config.merge_tracked(&NodeAgentConfig {
        container: ContainerConfig {
            log_level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            liveness_probe: Some(http_probe(DEFAULT_LIVENESS_PROBE_PATH)),
            readiness_probe: Some(http_probe(DEFAULT_READINESS_PROBE_PATH)),
            health_port: Some(DEFAULT_HEALTH_PORT),
            resources: None,
        },
        collect_events: Some(false),
        leader_election: Some(false),
        dogstatsd: DogstatsdConfig {
            origin_detection: Some(false),
            unix_domain_socket: UnixDomainSocketSpec {
                enabled: Some(false),
                host_filepath: Some(DEFAULT_DOGSTATSD_SOCKET_PATH.to_owned()),
            },
        },
        ..NodeAgentConfig::default()
    });

    if needs_container_runtime_socket(image) {
        shadow.cri_socket = config.cri_socket.merge_tracked(&CriSocketConfig {
            docker_socket_path: Some(DEFAULT_DOCKER_SOCKET_PATH.to_owned()),
            cri_socket_path: None,
        });
    }
    shadow
}

/// Whether the container runtime socket has to be configured explicitly.
///
/// Starting with 7.27.0 (and 6.27.0 on the 6.x line) the agent detects the socket on its own.
/// Tags that are not a version, other than `latest`, are assumed to be older.
fn needs_container_runtime_socket(image: &ImageConfig) -> bool {
    let Some(tag) = image.resolved_tag() else {
        return true;
    };
    let tag = tag.strip_suffix("-jmx").unwrap_or(tag);

    // Pre-releases of the minimum versions count as new enough.
    let autodetects = tag == "latest"
        || is_above_min_version(tag, "7.27.0-0")
        || (is_above_min_version(tag, "6.27.0-0") && !is_above_min_version(tag, "7.0.0-0"));
    trace!(tag, autodetects, "checked whether the agent detects the container runtime socket");
    !autodetects
}

fn default_deployment_strategy() -> DaemonSetDeploymentStrategy {
    DaemonSetDeploymentStrategy {
        update_strategy_type: Some(UpdateStrategyType::RollingUpdate),
        rolling_update: DaemonSetRollingUpdate {
            max_unavailable: Some(IntOrString::String(
                DEFAULT_ROLLING_UPDATE_MAX_UNAVAILABLE.to_owned(),
            )),
            max_pod_scheduler_failure: Some(IntOrString::String(
                DEFAULT_ROLLING_UPDATE_MAX_POD_SCHEDULER_FAILURE.to_owned(),
            )),
            max_parallel_pod_creation: Some(DEFAULT_ROLLING_UPDATE_MAX_PARALLEL_POD_CREATION),
            slow_start_interval_duration: Some(DEFAULT_ROLLING_UPDATE_SLOW_START_INTERVAL),
            slow_start_additive_increase: Some(IntOrString::String(
                DEFAULT_ROLLING_UPDATE_SLOW_START_ADDITIVE_INCREASE.to_owned(),
            )),
        },
        canary: CanaryStrategy::default_strategy(),
        reconcile_frequency: Some(DEFAULT_RECONCILE_FREQUENCY),
    }
}

fn default_apm(apm: &mut ApmSpec) -> ApmSpec {
    default_toggled(apm, false, |apm| {
        let mut shadow = apm.merge_tracked(&ApmSpec {
            host_port: Some(DEFAULT_APM_HOST_PORT),
            container: ContainerConfig {
                liveness_probe: Some(apm_liveness_probe()),
                ..ContainerConfig::default()
            },
            ..ApmSpec::default()
        });
        shadow.unix_domain_socket = default_toggled(&mut apm.unix_domain_socket, false, |uds| {
            uds.merge_tracked(&UnixDomainSocketSpec {
                enabled: None,
                host_filepath: Some(DEFAULT_APM_SOCKET_PATH.to_owned()),
            })
        });
        shadow
    })
}

/// Probes the health endpoint of an agent at `path`.
pub(super) fn http_probe(path: &str) -> Probe {
    Probe {
        http_get: Some(HTTPGetAction {
            path: Some(path.to_owned()),
            port: IntOrString::Int(DEFAULT_HEALTH_PORT),
            ..HTTPGetAction::default()
        }),
        ..probe_timings()
    }
}

/// The trace agent has no health endpoint, so only check that it accepts connections.
fn apm_liveness_probe() -> Probe {
    Probe {
        tcp_socket: Some(TCPSocketAction {
            port: IntOrString::Int(DEFAULT_APM_HOST_PORT),
            ..TCPSocketAction::default()
        }),
        success_threshold: None,
        failure_threshold: None,
        ..probe_timings()
    }
}

fn probe_timings() -> Probe {
    Probe {
        initial_delay_seconds: Some(DEFAULT_PROBE_INITIAL_DELAY_SECONDS),
        period_seconds: Some(DEFAULT_PROBE_PERIOD_SECONDS),
        timeout_seconds: Some(DEFAULT_PROBE_TIMEOUT_SECONDS),
        success_threshold: Some(DEFAULT_PROBE_SUCCESS_THRESHOLD),
        failure_threshold: Some(DEFAULT_PROBE_FAILURE_THRESHOLD),
        ..Probe::default()
    }
}

use std::thread;

use agent_operator::{
    cli::FeatureOptions,
    config::merge::Merge,
    crd::{v1alpha1, v2alpha1},
    defaults::{self, Defaulted},
    feature::{AgentContainerName, Feature, FeatureId, FeatureRegistry, RequiredComponents},
    k8s_openapi::api::core::v1::Probe,
};
use indoc::indoc;

fn v1alpha1_spec(yaml: &str) -> v1alpha1::AgentDeploymentSpec {
    serde_yaml::from_str(yaml).expect("valid v1alpha1 spec")
}

fn ids(features: &[Box<dyn Feature>]) -> Vec<FeatureId> {
    features.iter().map(|feature| feature.id()).collect()
}

fn http_path(probe: Option<&Probe>) -> Option<&str> {
    probe?.http_get.as_ref()?.path.as_deref()
}

fn resolve_v1alpha1(
    spec: v1alpha1::AgentDeploymentSpec,
) -> (Defaulted, Vec<FeatureId>, RequiredComponents) {
    let defaulted = defaults::resolve(spec);
    let (features, required) = FeatureRegistry::with_default_features()
        .build_features_v1alpha1(&defaulted.effective, &FeatureOptions::default());
    (defaulted, ids(&features), required)
}

#[test]
fn empty_spec() {
    let (Defaulted { effective, .. }, features, required) =
        resolve_v1alpha1(v1alpha1::AgentDeploymentSpec::default());

    let agent = &effective.agent;
    assert_eq!(agent.enabled, Some(true));
    assert_eq!(agent.image.name.as_deref(), Some("agent"));
    assert_eq!(agent.image.tag.as_deref(), Some("7.28.0"));
    assert_eq!(agent.config.container.health_port, Some(5555));
    assert_eq!(
        http_path(agent.config.container.liveness_probe.as_ref()),
        Some("/live")
    );
    assert_eq!(
        http_path(agent.config.container.readiness_probe.as_ref()),
        Some("/ready")
    );

    assert_eq!(effective.cluster_agent.enabled, Some(true));
    assert_eq!(
        effective.cluster_agent.image.name.as_deref(),
        Some("cluster-agent")
    );
    assert_eq!(effective.cluster_agent.image.tag.as_deref(), Some("1.12.0"));
    assert_eq!(effective.cluster_checks_runner.enabled, Some(false));

    // The orchestrator explorer is enabled by default and brings the process agent along.
    assert_eq!(effective.agent.process.enabled, Some(true));
    assert_eq!(
        features,
        [FeatureId::OrchestratorExplorer, FeatureId::Process]
    );
    assert!(required.node_agent.is_enabled());
    assert!(!required.node_agent.privileged);
    assert!(required.cluster_agent.is_enabled());
    assert!(!required.cluster_checks_runner.is_enabled());
}

#[test]
fn orchestrator_explorer_forces_process_agent() {
    let (
        Defaulted {
            effective,
            overrides,
        },
        features,
        required,
    ) = resolve_v1alpha1(v1alpha1_spec(indoc! {"
        features:
          orchestratorExplorer:
            enabled: true
    "}));

    assert_eq!(effective.agent.process.enabled, Some(true));
    assert_eq!(overrides.agent.process.enabled, Some(true));
    assert_eq!(
        effective.agent.process.process_collection_enabled,
        Some(false)
    );

    assert!(features.contains(&FeatureId::OrchestratorExplorer));
    assert!(features.contains(&FeatureId::Process));
    assert!(
        required
            .node_agent
            .containers
            .contains(&AgentContainerName::ProcessAgent)
    );
}

#[test]
fn explicitly_disabled_process_is_overridden() {
    let (Defaulted { effective, overrides }, features, _) =
        resolve_v1alpha1(v1alpha1_spec(indoc! {"
            agent:
              process:
                enabled: false
            features:
              orchestratorExplorer:
                enabled: true
        "}));

    assert_eq!(effective.agent.process.enabled, Some(true));
    assert_eq!(overrides.agent.process.enabled, Some(true));
    assert!(features.contains(&FeatureId::Process));
}

#[test]
fn network_monitoring_requires_privileged_node_agent() {
    let (Defaulted { effective, .. }, features, required) =
        resolve_v1alpha1(v1alpha1_spec(indoc! {"
            features:
              networkMonitoring:
                enabled: true
        "}));

    assert_eq!(effective.agent.system_probe.enabled, Some(true));
    assert!(features.contains(&FeatureId::NetworkMonitoring));
    assert!(required.node_agent.privileged);
    assert!(
        required
            .node_agent
            .containers
            .contains(&AgentContainerName::SystemProbe)
    );
}

#[test]
fn system_probe_follows_required_components() {
    let (Defaulted { effective, .. }, _, required) = resolve_v1alpha1(v1alpha1_spec(indoc! {"
        agent:
          systemProbe:
            enabled: false
            enableOomKill: true
            enableTcpQueueLength: true
        features:
          networkMonitoring:
            enabled: true
    "}));

    let system_probe_required = required
        .node_agent
        .containers
        .contains(&AgentContainerName::SystemProbe);
    assert!(system_probe_required);
    assert_eq!(effective.agent.system_probe.enabled, Some(true));
    assert!(effective.agent.system_probe.seccomp_profile_name.is_some());
}

#[test]
fn disabled_system_probe_runs_no_kernel_checks() {
    let (Defaulted { effective, .. }, features, required) =
        resolve_v1alpha1(v1alpha1_spec(indoc! {"
            agent:
              systemProbe:
                enabled: false
                enableOomKill: true
                enableTcpQueueLength: true
        "}));

    assert_eq!(effective.agent.system_probe.enabled, Some(false));
    assert!(!features.contains(&FeatureId::OomKill));
    assert!(!features.contains(&FeatureId::TcpQueueLength));
    assert!(
        !required
            .node_agent
            .containers
            .contains(&AgentContainerName::SystemProbe)
    );
}

#[test]
fn defaulting_is_idempotent() {
    let spec = v1alpha1_spec(indoc! {"
        agent:
          image:
            name: agent:6.26.0
          apm:
            enabled: true
        clusterChecksRunner:
          replicas: 2
        features:
          networkMonitoring:
            enabled: true
          logCollection:
            enabled: true
    "});

    let first = defaults::resolve(spec);
    assert!(!first.overrides.is_unset());

    let second = defaults::resolve(first.effective.clone());
    assert!(second.overrides.is_unset());
    assert_eq!(second.effective, first.effective);
}

#[test]
fn multi_process_is_cleared_by_privileged_features() {
    let spec: v2alpha1::AgentDeploymentSpec = serde_yaml::from_str(indoc! {"
        global:
          containerProcessModel:
            useMultiProcessContainer: true
        features:
          runtimeSecurity:
            enabled: true
          tcpQueueLength:
            enabled: true
    "})
    .expect("valid v2alpha1 spec");

    let (features, required) = FeatureRegistry::with_default_features()
        .build_features(&spec, &FeatureOptions::default());

    assert_eq!(
        ids(&features),
        [
            FeatureId::AdmissionController,
            FeatureId::ClusterChecks,
            FeatureId::KubernetesStateCore,
            FeatureId::OrchestratorExplorer,
            FeatureId::RuntimeSecurity,
            FeatureId::TcpQueueLength,
        ]
    );

    let node_agent = &required.node_agent;
    assert!(node_agent.is_enabled());
    assert!(node_agent.privileged);
    // Resolved while the multi-process container was still in use.
    assert!(
        node_agent
            .containers
            .contains(&AgentContainerName::UnprivilegedSingleAgent)
    );
    // The TCP queue length check was resolved after it was given up.
    assert!(node_agent.containers.contains(&AgentContainerName::Agent));
    assert!(
        node_agent
            .containers
            .contains(&AgentContainerName::SecurityAgent)
    );
}

#[test]
fn concurrent_resolutions() {
    let registry = FeatureRegistry::with_default_features();
    let spec = v2alpha1::AgentDeploymentSpec::default();
    let expected = registry.build_features(&spec, &FeatureOptions::default()).1;

    thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| registry.build_features(&spec, &FeatureOptions::default()).1))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().expect("resolution succeeds"), expected);
        }
    });
}

#[test]
fn status_reports_defaulted_values() {
    let mut deployment = v1alpha1::AgentDeployment::new(
        "agents",
        v1alpha1_spec(indoc! {"
            clusterAgent:
              enabled: false
        "}),
    );
    deployment.metadata.namespace = Some("monitoring".to_owned());

    let status = deployment.apply_defaults();
    assert_eq!(status.default_override.cluster_agent.enabled, None);
    assert!(status.default_override.cluster_agent.image.is_unset());
    assert_eq!(status.default_override.agent.enabled, Some(true));
}

use super::*;
use crate::crd::{
    common::ContainerConfig,
    v1alpha1::{
        AdmissionControllerConfig, ClusterAgentConfig, ClusterAgentFeatures, ClusterAgentSpec,
        ExternalMetricsConfig,
    },
};

pub(super) fn default_cluster_agent(cluster_agent: &mut ClusterAgentSpec) -> ClusterAgentSpec {
    default_toggled(cluster_agent, true, |cluster_agent| ClusterAgentSpec {
        image: cluster_agent.image.merge_tracked(&default_image(
            DEFAULT_CLUSTER_AGENT_IMAGE_NAME,
            DEFAULT_CLUSTER_AGENT_IMAGE_TAG,
        )),
        config: default_cluster_agent_config(&mut cluster_agent.config),
        rbac: cluster_agent.rbac.merge_tracked(&default_rbac()),
        network_policy: cluster_agent
            .network_policy
            .merge_tracked(&default_network_policy()),
        ..ClusterAgentSpec::default()
    })
}

fn default_cluster_agent_config(config: &mut ClusterAgentConfig) -> ClusterAgentConfig {
    let mut shadow = config.merge_tracked(&ClusterAgentConfig {
        container: ContainerConfig {
            log_level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            health_port: Some(DEFAULT_HEALTH_PORT),
            ..ContainerConfig::default()
        },
        features: ClusterAgentFeatures {
            cluster_checks_enabled: Some(false),
            collect_events: Some(false),
            ..ClusterAgentFeatures::default()
        },
    });

    let features = &mut config.features;

    // Configuring anything but the switch implies that the user wants external metrics.
    let external_metrics_by_default = !features.external_metrics.is_unset();
    shadow.features.external_metrics = default_toggled(
        &mut features.external_metrics,
        external_metrics_by_default,
        |external_metrics| {
            external_metrics.merge_tracked(&ExternalMetricsConfig {
                port: Some(DEFAULT_EXTERNAL_METRICS_PORT),
                ..ExternalMetricsConfig::default()
            })
        },
    );

    shadow.features.admission_controller = default_toggled(
        &mut features.admission_controller,
        false,
        |admission_controller| {
            admission_controller.merge_tracked(&AdmissionControllerConfig {
                enabled: None,
                mutate_unlabelled: Some(false),
                service_name: Some(DEFAULT_ADMISSION_SERVICE_NAME.to_owned()),
            })
        },
    );
    shadow
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults() {
        let mut cluster_agent = ClusterAgentSpec::default();
        let shadow = default_cluster_agent(&mut cluster_agent);

        assert_eq!(cluster_agent.enabled, Some(true));
        assert_eq!(
            cluster_agent.image.name.as_deref(),
            Some(DEFAULT_CLUSTER_AGENT_IMAGE_NAME)
        );
        assert_eq!(cluster_agent.config.container.health_port, Some(5555));
        assert_eq!(cluster_agent.config.container.liveness_probe, None);
        assert_eq!(
            cluster_agent.config.features.external_metrics,
            ExternalMetricsConfig {
                enabled: Some(false),
                ..ExternalMetricsConfig::default()
            }
        );
        assert_eq!(cluster_agent.rbac.create, Some(true));
        assert_eq!(cluster_agent.network_policy.create, Some(false));
        assert_eq!(shadow, cluster_agent);
    }

    #[rstest]
    #[case::absent(ExternalMetricsConfig::default(), Some(false), None)]
    #[case::configured(
        ExternalMetricsConfig {
            use_metrics_queries: Some(true),
            ..ExternalMetricsConfig::default()
        },
        Some(true),
        Some(DEFAULT_EXTERNAL_METRICS_PORT),
    )]
    #[case::explicitly_disabled(
        ExternalMetricsConfig {
            enabled: Some(false),
            use_metrics_queries: Some(true),
            ..ExternalMetricsConfig::default()
        },
        Some(false),
        None,
    )]
    #[case::custom_port(
        ExternalMetricsConfig {
            enabled: Some(true),
            port: Some(443),
            ..ExternalMetricsConfig::default()
        },
        Some(true),
        Some(443),
    )]
    fn external_metrics(
        #[case] external_metrics_case: ExternalMetricsConfig,
        #[case] expected_enabled: Option<bool>,
        #[case] expected_port: Option<i32>,
    ) {
        let mut config = ClusterAgentConfig {
            features: ClusterAgentFeatures {
                external_metrics: external_metrics_case,
                ..ClusterAgentFeatures::default()
            },
            ..ClusterAgentConfig::default()
        };

        default_cluster_agent_config(&mut config);
        assert_eq!(config.features.external_metrics.enabled, expected_enabled);
        assert_eq!(config.features.external_metrics.port, expected_port);
    }

    #[test]
    fn enabled_admission_controller() {
        let mut config = ClusterAgentConfig {
            features: ClusterAgentFeatures {
                admission_controller: AdmissionControllerConfig {
                    enabled: Some(true),
                    ..AdmissionControllerConfig::default()
                },
                ..ClusterAgentFeatures::default()
            },
            ..ClusterAgentConfig::default()
        };

        let shadow = default_cluster_agent_config(&mut config);
        assert_eq!(
            shadow.features.admission_controller,
            AdmissionControllerConfig {
                enabled: None,
                mutate_unlabelled: Some(false),
                service_name: Some(DEFAULT_ADMISSION_SERVICE_NAME.to_owned()),
            }
        );
    }
}

use super::*;
use crate::crd::v1alpha1::{
    FeaturesSpec, KubeStateMetricsCoreConfig, LogCollectionConfig, NetworkMonitoringConfig,
    OrchestratorExplorerConfig, PrometheusScrapeConfig, ScrubbingConfig,
};

/// Checks that can run as cluster checks do so by default if cluster checks runners are deployed.
pub(super) fn default_features(
    features: &mut FeaturesSpec,
    cluster_checks_runner_enabled: bool,
) -> FeaturesSpec {
    FeaturesSpec {
        orchestrator_explorer: default_toggled(
            &mut features.orchestrator_explorer,
            true,
            |orchestrator_explorer| {
                orchestrator_explorer.merge_tracked(&OrchestratorExplorerConfig {
                    cluster_check: Some(cluster_checks_runner_enabled),
                    scrubbing: ScrubbingConfig {
                        containers: Some(true),
                    },
                    ..OrchestratorExplorerConfig::default()
                })
            },
        ),
        kube_state_metrics_core: features.kube_state_metrics_core.merge_tracked(
            &KubeStateMetricsCoreConfig {
                enabled: Some(false),
                cluster_check: Some(cluster_checks_runner_enabled),
            },
        ),
        prometheus_scrape: default_toggled(
            &mut features.prometheus_scrape,
            false,
            |prometheus_scrape| {
                prometheus_scrape.merge_tracked(&PrometheusScrapeConfig {
                    service_endpoints: Some(false),
                    ..PrometheusScrapeConfig::default()
                })
            },
        ),
        log_collection: default_toggled(&mut features.log_collection, false, |log_collection| {
            log_collection.merge_tracked(&LogCollectionConfig {
                enabled: None,
                logs_config_container_collect_all: Some(false),
                container_collect_using_files: Some(true),
                container_logs_path: Some(DEFAULT_CONTAINER_LOGS_PATH.to_owned()),
                pod_logs_path: Some(DEFAULT_POD_LOGS_PATH.to_owned()),
                container_symlinks_path: Some(DEFAULT_CONTAINER_SYMLINKS_PATH.to_owned()),
                temp_storage_path: Some(DEFAULT_LOGS_TEMP_STORAGE_PATH.to_owned()),
                open_files_limit: Some(DEFAULT_LOGS_OPEN_FILES_LIMIT),
            })
        }),
        network_monitoring: features
            .network_monitoring
            .merge_tracked(&NetworkMonitoringConfig {
                enabled: Some(false),
            }),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn cluster_checks_follow_runner(#[case] cluster_checks_runner_enabled: bool) {
        let mut features = FeaturesSpec::default();
        default_features(&mut features, cluster_checks_runner_enabled);

        assert_eq!(features.orchestrator_explorer.enabled, Some(true));
        assert_eq!(
            features.orchestrator_explorer.cluster_check,
            Some(cluster_checks_runner_enabled)
        );
        assert_eq!(features.kube_state_metrics_core.enabled, Some(false));
        assert_eq!(
            features.kube_state_metrics_core.cluster_check,
            Some(cluster_checks_runner_enabled)
        );
    }

    #[test]
    fn disabled_orchestrator_explorer() {
        let mut features = FeaturesSpec {
            orchestrator_explorer: OrchestratorExplorerConfig {
                enabled: Some(false),
                ..OrchestratorExplorerConfig::default()
            },
            ..FeaturesSpec::default()
        };

        let shadow = default_features(&mut features, true);
        assert!(features.orchestrator_explorer.scrubbing.is_unset());
        assert!(shadow.orchestrator_explorer.is_unset());
    }

    #[test]
    fn enabled_log_collection() {
        let mut features = FeaturesSpec {
            log_collection: LogCollectionConfig {
                enabled: Some(true),
                open_files_limit: Some(500),
                ..LogCollectionConfig::default()
            },
            ..FeaturesSpec::default()
        };

        let shadow = default_features(&mut features, false);
        assert_eq!(features.log_collection.open_files_limit, Some(500));
        assert_eq!(shadow.log_collection.open_files_limit, None);
        assert_eq!(shadow.log_collection.enabled, None);
        assert_eq!(
            shadow.log_collection.pod_logs_path.as_deref(),
            Some(DEFAULT_POD_LOGS_PATH)
        );
        assert_eq!(
            features.log_collection.container_collect_using_files,
            Some(true)
        );
    }

    #[test]
    fn disabled_features_only_get_switch() {
        let mut features = FeaturesSpec::default();
        let shadow = default_features(&mut features, false);

        assert_eq!(
            features.log_collection,
            LogCollectionConfig {
                enabled: Some(false),
                ..LogCollectionConfig::default()
            }
        );
        assert_eq!(shadow.prometheus_scrape.enabled, Some(false));
        assert_eq!(shadow.prometheus_scrape.service_endpoints, None);
        assert_eq!(shadow.network_monitoring.enabled, Some(false));
    }
}

use super::{agent::http_probe, *};
use crate::crd::{common::ContainerConfig, v1alpha1::ClusterChecksRunnerSpec};

/// The runners are only deployed on request, but configuring any of their settings counts as a
/// request.
pub(super) fn default_cluster_checks_runner(
    runner: &mut ClusterChecksRunnerSpec,
) -> ClusterChecksRunnerSpec {
    let enabled_by_default = !runner.is_unset();
    default_toggled(runner, enabled_by_default, |runner| {
        ClusterChecksRunnerSpec {
            image: runner.image.merge_tracked(&default_image(
                DEFAULT_AGENT_IMAGE_NAME,
                DEFAULT_AGENT_IMAGE_TAG,
            )),
            config: runner.config.merge_tracked(&ContainerConfig {
                log_level: Some(DEFAULT_LOG_LEVEL.to_owned()),
                liveness_probe: Some(http_probe(DEFAULT_LIVENESS_PROBE_PATH)),
                readiness_probe: Some(http_probe(DEFAULT_READINESS_PROBE_PATH)),
                health_port: Some(DEFAULT_HEALTH_PORT),
                resources: None,
            }),
            rbac: runner.rbac.merge_tracked(&default_rbac()),
            network_policy: runner.network_policy.merge_tracked(&default_network_policy()),
            ..ClusterChecksRunnerSpec::default()
        }
    })
}

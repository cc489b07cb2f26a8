//! Canary rollouts of the node agent daemonset.
//!
//! When the extended daemonset is used, a new agent version is first rolled out to a small number
//! of canary nodes. The rollout is paused or failed automatically when the canary pods keep
//! restarting.
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{config::merge::Merge, crd::impl_toggle, time::Duration};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct CanaryStrategy {
    /// Number (or percentage) of nodes running the canary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<IntOrString>,

    /// How long the canary has to run without problems before the rollout continues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub auto_pause: CanaryAutoPause,

    #[serde(default, skip_serializing_if = "Merge::is_unset")]
    pub auto_fail: CanaryAutoFail,
}

impl CanaryStrategy {
    pub const DEFAULT_REPLICAS: i32 = 1;
    pub const DEFAULT_DURATION: Duration = Duration::from_minutes(10);
    pub const DEFAULT_AUTO_PAUSE_MAX_RESTARTS: i32 = 2;
    pub const DEFAULT_AUTO_FAIL_MAX_RESTARTS: i32 = 5;

    /// The canary strategy used when none is configured.
    pub fn default_strategy() -> Self {
        Self {
            replicas: Some(IntOrString::Int(Self::DEFAULT_REPLICAS)),
            duration: Some(Self::DEFAULT_DURATION),
            auto_pause: CanaryAutoPause {
                enabled: Some(true),
                max_restarts: Some(Self::DEFAULT_AUTO_PAUSE_MAX_RESTARTS),
            },
            auto_fail: CanaryAutoFail {
                enabled: Some(true),
                max_restarts: Some(Self::DEFAULT_AUTO_FAIL_MAX_RESTARTS),
            },
        }
    }
}

/// Pauses the rollout once a canary pod restarted more than `max_restarts` times.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct CanaryAutoPause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_restarts: Option<i32>,
}

/// Fails the rollout once a canary pod restarted more than `max_restarts` times.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct CanaryAutoFail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_restarts: Option<i32>,
}

impl_toggle!(CanaryAutoPause, CanaryAutoFail);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::merge::merge, crd::Toggle};

    #[test]
    fn default_strategy() {
        let strategy = CanaryStrategy::default_strategy();
        assert_eq!(strategy.replicas, Some(IntOrString::Int(1)));
        assert_eq!(strategy.duration, Some(Duration::from_minutes(10)));
        assert!(strategy.auto_pause.is_enabled());
        assert_eq!(strategy.auto_pause.max_restarts, Some(2));
        assert!(strategy.auto_fail.is_enabled());
        assert_eq!(strategy.auto_fail.max_restarts, Some(5));
    }

    #[test]
    fn partial_strategy_keeps_user_values() {
        let user = CanaryStrategy {
            duration: Some(Duration::from_minutes(30)),
            auto_fail: CanaryAutoFail {
                enabled: Some(false),
                max_restarts: None,
            },
            ..CanaryStrategy::default()
        };

        let (merged, shadow) = merge(user, &CanaryStrategy::default_strategy());
        assert_eq!(merged.duration, Some(Duration::from_minutes(30)));
        assert_eq!(merged.auto_fail.enabled, Some(false));
        assert_eq!(merged.auto_fail.max_restarts, Some(5));
        assert_eq!(shadow.duration, None);
        assert_eq!(shadow.auto_fail.enabled, None);
        assert_eq!(shadow.replicas, Some(IntOrString::Int(1)));
    }
}

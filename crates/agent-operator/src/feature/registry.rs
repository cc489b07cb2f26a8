use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use snafu::{Snafu, ensure};
use tracing::{debug, info, instrument};

use crate::{
    cli::FeatureOptions,
    crd::{v1alpha1, v2alpha1},
    feature::{BuildFn, Feature, FeatureId, RequiredComponents, features},
};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("the feature {id} is registered already"))]
    DuplicateFeature { id: FeatureId },
}

/// Knows how to build every available [`Feature`].
///
/// Registration takes the write lock, resolutions share the read lock. Every resolution builds
/// its own features, so concurrent resolutions never share state.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    builders: RwLock<BTreeMap<FeatureId, BuildFn>>,
}

impl FeatureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing all built-in features.
    pub fn with_default_features() -> Self {
        Self {
            builders: RwLock::new(features::BUILDERS.into_iter().collect()),
        }
    }

    /// Registers `build` for `id`, refusing to replace an existing registration.
    pub fn register(&self, id: FeatureId, build: BuildFn) -> Result<()> {
        // A panic while holding the lock cannot leave the map half-written.
        let mut builders = self.builders.write().unwrap_or_else(PoisonError::into_inner);
        ensure!(!builders.contains_key(&id), DuplicateFeatureSnafu { id });
        builders.insert(id, build);
        Ok(())
    }

    /// All registered feature ids, in their natural order.
    pub fn feature_ids(&self) -> Vec<FeatureId> {
        self.read().keys().copied().collect()
    }

    /// Resolves which features are enabled for a `v2alpha1` spec and what they require.
    ///
    /// With the multi-process container, privileged features are resolved last. The multi-process
    /// container is given up as soon as the node agent has to run privileged containers, for
    /// all features resolved afterwards.
    #[instrument(skip_all, fields(multi_process = spec.use_multi_process_container()))]
    pub fn build_features(
        &self,
        spec: &v2alpha1::AgentDeploymentSpec,
        options: &FeatureOptions,
    ) -> (Vec<Box<dyn Feature>>, RequiredComponents) {
        let builders = self.read();
        let mut multi_process = spec.use_multi_process_container();

        let mut enabled_features = Vec::new();
        let mut required_components = RequiredComponents::default();
        for (id, build) in resolution_order(&builders, multi_process) {
            let mut feature = build(options);
            let components = feature.configure(spec, multi_process);
            required_components.merge(&components);

            let node_agent = &required_components.node_agent;
            if multi_process && node_agent.is_enabled() && node_agent.privileged {
                info!(
                    feature.id = %id,
                    "node agent requires privileged containers, not using the multi-process container"
                );
                multi_process = false;
            }

            // Features that expressed no opinion about any component are dropped.
            let enabled = components.is_configured();
            debug!(feature.id = %id, feature.enabled = enabled, "resolved feature");
            if enabled {
                enabled_features.push(feature);
            }
        }

        (enabled_features, required_components)
    }

    /// Resolves which features are enabled for a (defaulted) `v1alpha1` spec and what they
    /// require.
    ///
    /// A feature only counts as enabled if it requires at least one component.
    #[instrument(skip_all)]
    pub fn build_features_v1alpha1(
        &self,
        spec: &v1alpha1::AgentDeploymentSpec,
        options: &FeatureOptions,
    ) -> (Vec<Box<dyn Feature>>, RequiredComponents) {
        let builders = self.read();

        let mut enabled_features = Vec::new();
        let mut required_components = RequiredComponents::default();
        for (id, build) in resolution_order(&builders, false) {
            let mut feature = build(options);
            let components = feature.configure_v1alpha1(spec);
            required_components.merge(&components);

            let enabled = components.is_enabled();
            debug!(feature.id = %id, feature.enabled = enabled, "resolved feature");
            if enabled {
                enabled_features.push(feature);
            }
        }

        (enabled_features, required_components)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<FeatureId, BuildFn>> {
        self.builders.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Features are resolved ordered by their id. With the multi-process container, the privileged
/// ones are moved to the end as a block.
fn resolution_order(
    builders: &BTreeMap<FeatureId, BuildFn>,
    multi_process: bool,
) -> Vec<(FeatureId, BuildFn)> {
    let mut order = builders
        .iter()
        .map(|(id, build)| (*id, *build))
        .collect::<Vec<_>>();
    if multi_process {
        // Stable, so both blocks stay ordered by id.
        order.sort_by_key(|(id, _)| id.is_privileged());
    }
    order
}

#[cfg(test)]
mod tests {
    use std::thread;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::{
        crd::v2alpha1::FeatureToggle,
        feature::{AgentContainerName, RequiredComponent},
    };

    fn ids(order: &[(FeatureId, BuildFn)]) -> Vec<FeatureId> {
        order.iter().map(|(id, _)| *id).collect()
    }

    #[derive(Debug)]
    struct Noop(FeatureId);

    impl Feature for Noop {
        fn id(&self) -> FeatureId {
            self.0
        }

        fn configure(
            &mut self,
            _spec: &v2alpha1::AgentDeploymentSpec,
            _multi_process: bool,
        ) -> RequiredComponents {
            RequiredComponents::default()
        }

        fn configure_v1alpha1(
            &mut self,
            _spec: &v1alpha1::AgentDeploymentSpec,
        ) -> RequiredComponents {
            RequiredComponents::default()
        }
    }

    fn build_noop(_options: &FeatureOptions) -> Box<dyn Feature> {
        Box::new(Noop(FeatureId::Apm))
    }

    #[test]
    fn duplicate_registration() {
        let registry = FeatureRegistry::new();
        registry
            .register(FeatureId::Apm, build_noop)
            .expect("first registration succeeds");

        let err = registry
            .register(FeatureId::Apm, build_noop)
            .expect_err("second registration fails");
        assert!(matches!(err, Error::DuplicateFeature { id: FeatureId::Apm }));
        assert_eq!(err.to_string(), "the feature apm is registered already");
        assert_eq!(registry.feature_ids(), [FeatureId::Apm]);
    }

    #[test]
    fn default_features_are_all_registered() {
        let registry = FeatureRegistry::with_default_features();
        assert_eq!(registry.feature_ids(), FeatureId::iter().collect::<Vec<_>>());

        for id in FeatureId::iter() {
            assert!(registry.register(id, build_noop).is_err());
        }
    }

    #[test]
    fn concurrent_registration() {
        let registry = FeatureRegistry::new();
        let builders = features::BUILDERS;
        let (left, right) = builders.split_at(builders.len() / 2);

        thread::scope(|scope| {
            for half in [left, right] {
                let registry = &registry;
                scope.spawn(move || {
                    for &(id, build) in half {
                        registry.register(id, build).expect("ids are disjoint");
                    }
                });
            }

            scope.spawn(|| {
                for _ in 0..100 {
                    let ids = registry.feature_ids();
                    assert!(ids.is_sorted());
                    assert!(ids.len() <= builders.len());
                }
            });
        });

        assert_eq!(registry.feature_ids(), FeatureId::iter().collect::<Vec<_>>());
    }

    #[test]
    fn concurrent_duplicate_registration() {
        let registry = FeatureRegistry::new();
        let registered = thread::scope(|scope| {
            let handles = (0..4)
                .map(|_| scope.spawn(|| registry.register(FeatureId::Apm, build_noop).is_ok()))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("registration does not panic"))
                .filter(|&registered| registered)
                .count()
        });

        assert_eq!(registered, 1);
        assert_eq!(registry.feature_ids(), [FeatureId::Apm]);
    }

    #[test]
    fn sorted_resolution_order() {
        let builders = features::BUILDERS.into_iter().collect();
        let order = ids(&resolution_order(&builders, false));

        let mut sorted = order.clone();
        sorted.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
        assert_eq!(order, sorted);
    }

    #[test]
    fn privileged_features_come_last_with_multi_process() {
        let builders = features::BUILDERS.into_iter().collect();
        let order = ids(&resolution_order(&builders, true));

        let first_privileged = order
            .iter()
            .position(|id| id.is_privileged())
            .expect("privileged features are registered");
        assert!(order[..first_privileged].iter().all(|id| !id.is_privileged()));
        assert!(order[first_privileged..].iter().all(|id| id.is_privileged()));
        assert!(order[..first_privileged].is_sorted());
        assert!(order[first_privileged..].is_sorted());

        // Only what is registered is resolved.
        let builders = BTreeMap::from([
            (FeatureId::OomKill, build_noop as BuildFn),
            (FeatureId::Process, build_noop),
        ]);
        assert_eq!(
            ids(&resolution_order(&builders, true)),
            [FeatureId::Process, FeatureId::OomKill]
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let registry = FeatureRegistry::with_default_features();
        let spec = v2alpha1::AgentDeploymentSpec::default();

        let resolve = || {
            let (features, required) = registry.build_features(&spec, &FeatureOptions::default());
            (
                features.iter().map(|feature| feature.id()).collect::<Vec<_>>(),
                required,
            )
        };
        assert_eq!(resolve(), resolve());
    }

    #[test]
    fn features_without_opinion_are_dropped() {
        let registry = FeatureRegistry::new();
        registry
            .register(FeatureId::Apm, build_noop)
            .expect("registration succeeds");

        let (features, required) = registry.build_features(
            &v2alpha1::AgentDeploymentSpec::default(),
            &FeatureOptions::default(),
        );
        assert!(features.is_empty());
        assert_eq!(required, RequiredComponents::default());
    }

    #[test]
    fn multi_process_is_given_up_for_later_features() {
        let mut spec = v2alpha1::AgentDeploymentSpec::default();
        spec.global.container_process_model.use_multi_process_container = Some(true);
        spec.features.apm = FeatureToggle::on();
        // Not a privileged feature, but it needs the system probe.
        spec.features.network_monitoring = FeatureToggle::on();
        spec.features.process = FeatureToggle::on();

        let registry = FeatureRegistry::with_default_features();
        let (_, required) = registry.build_features(&spec, &FeatureOptions::default());

        // apm < network_monitoring < process
        assert_eq!(
            required.node_agent,
            RequiredComponent {
                is_required: Some(true),
                privileged: true,
                containers: [
                    AgentContainerName::UnprivilegedSingleAgent,
                    AgentContainerName::Agent,
                    AgentContainerName::ProcessAgent,
                    AgentContainerName::SystemProbe,
                ]
                .into(),
            }
        );
    }

    #[test]
    fn v1alpha1_features_must_require_a_component() {
        let registry = FeatureRegistry::with_default_features();
        let mut spec = v1alpha1::AgentDeploymentSpec::default();
        spec.cluster_checks_runner.enabled = Some(false);

        let (features, required) =
            registry.build_features_v1alpha1(&spec, &FeatureOptions::default());
        assert!(features.is_empty());
        assert_eq!(required, RequiredComponents::default());
    }
}

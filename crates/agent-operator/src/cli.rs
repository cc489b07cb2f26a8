//! Operator-level options that influence how features are resolved.

/// Options passed to every [`Feature`](crate::feature::Feature) when it is built.
///
/// Additionally, this struct can be used as operator CLI arguments. This functionality is only
/// available if the feature `clap` is enabled.
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureOptions {
    /// Run the process and orchestrator checks in the core agent instead of a dedicated process
    /// agent container.
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub run_process_checks_in_core_agent: bool,
}

//! Resolution engine for monitoring agent deployments.
//!
//! Given the desired state of an [`AgentDeployment`](crd::v1alpha1::AgentDeployment), this crate
//! works out the *effective* configuration and which components have to run:
//!
//! - [`defaults`] fills in every missing value of a `v1alpha1` spec and records what it filled in.
//! - [`feature`] resolves the enabled monitoring capabilities and merges what they require from the
//!   node agent, the cluster agent and the cluster checks runner.
//!
//! Rendering the resulting workloads is left to the caller.
//!
//! ## Crate Features
//!
//! - `default` enables `clap`.
//! - `clap` derives `clap::Args` for [`cli::FeatureOptions`].

pub mod cli;
pub mod config;
pub mod crd;
pub mod defaults;
pub mod feature;
pub mod rollout;
pub mod time;
pub mod utils;

// External re-exports
pub use k8s_openapi;
pub use kube;
pub use schemars;

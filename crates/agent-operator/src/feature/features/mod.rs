//! The built-in features.
//!
//! Each feature lives in its own module and exposes a `build` function, which is registered in
//! [`BUILDERS`].
use crate::feature::{AgentContainerName, BuildFn, FeatureId};

pub mod admission_controller;
pub mod apm;
pub mod cluster_checks;
pub mod compliance;
pub mod ebpf_check;
pub mod event_collection;
pub mod external_metrics;
pub mod kubernetes_state_core;
pub mod log_collection;
pub mod network_monitoring;
pub mod oom_kill;
pub mod orchestrator_explorer;
pub mod process;
pub mod prometheus_scrape;
pub mod runtime_security;
pub mod service_monitoring;
pub mod tcp_queue_length;

pub(super) const BUILDERS: [(FeatureId, BuildFn); 17] = [
    (FeatureId::AdmissionController, admission_controller::build),
    (FeatureId::Apm, apm::build),
    (FeatureId::ClusterChecks, cluster_checks::build),
    (FeatureId::Compliance, compliance::build),
    (FeatureId::EbpfCheck, ebpf_check::build),
    (FeatureId::EventCollection, event_collection::build),
    (FeatureId::ExternalMetrics, external_metrics::build),
    (FeatureId::KubernetesStateCore, kubernetes_state_core::build),
    (FeatureId::LogCollection, log_collection::build),
    (FeatureId::NetworkMonitoring, network_monitoring::build),
    (FeatureId::OomKill, oom_kill::build),
    (FeatureId::OrchestratorExplorer, orchestrator_explorer::build),
    (FeatureId::Process, process::build),
    (FeatureId::PrometheusScrape, prometheus_scrape::build),
    (FeatureId::RuntimeSecurity, runtime_security::build),
    (FeatureId::ServiceMonitoring, service_monitoring::build),
    (FeatureId::TcpQueueLength, tcp_queue_length::build),
];

/// Node agent containers needed to run the process checks.
fn process_check_containers(run_in_core_agent: bool) -> &'static [AgentContainerName] {
    if run_in_core_agent {
        &[AgentContainerName::Agent]
    } else {
        &[AgentContainerName::Agent, AgentContainerName::ProcessAgent]
    }
}

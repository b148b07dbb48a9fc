use synthea_trigger_core::config::{DiscoveryConfig, EcsTarget};
use synthea_trigger_core::contract::{task_launch_request, CommandOverride, TaskLaunched};
use synthea_trigger_core::error::TriggerError;
use tracing::{info, warn};

use crate::adapters::ecs::TaskLauncher;
use crate::adapters::network::NetworkDirectory;
use crate::handlers::discovery::discover_network;

/// Discovers the network context, then launches exactly one Fargate task.
pub fn launch_task(
    launcher: &dyn TaskLauncher,
    directory: &dyn NetworkDirectory,
    target: &EcsTarget,
    discovery: &DiscoveryConfig,
    command: &CommandOverride,
) -> Result<TaskLaunched, TriggerError> {
    let network = discover_network(directory, discovery)?;
    let request = task_launch_request(target, network, command);
    info!(
        cluster = %request.cluster,
        task_definition = %request.task_definition,
        subnet_id = %request.network.subnet_id,
        security_group_id = %request.network.security_group_id,
        "launching fargate task"
    );

    let outcome = launcher.run_task(&request)?;
    for failure in &outcome.failures {
        warn!(%failure, "RunTask reported a failure");
    }

    let Some(task_arn) = outcome.task_arns.into_iter().next() else {
        return Err(TriggerError::LaunchRejected {
            failures: outcome.failures,
        });
    };

    info!(%task_arn, "fargate task launched");
    Ok(TaskLaunched { task_arn })
}

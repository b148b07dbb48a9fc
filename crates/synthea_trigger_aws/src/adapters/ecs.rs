use aws_sdk_ecs::operation::run_task::RunTaskOutput;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, ContainerOverride, NetworkConfiguration, TaskOverride,
};
use synthea_trigger_core::contract::{RunTaskOutcome, TaskLaunchRequest};
use synthea_trigger_core::error::ApiError;

pub trait TaskLauncher {
    fn run_task(&self, request: &TaskLaunchRequest) -> Result<RunTaskOutcome, ApiError>;
}

/// `awsvpc` placement in the request's single subnet and security group.
pub fn network_configuration(
    request: &TaskLaunchRequest,
) -> Result<NetworkConfiguration, ApiError> {
    let assign_public_ip = if request.assign_public_ip {
        AssignPublicIp::Enabled
    } else {
        AssignPublicIp::Disabled
    };
    let awsvpc = AwsVpcConfiguration::builder()
        .subnets(&request.network.subnet_id)
        .security_groups(&request.network.security_group_id)
        .assign_public_ip(assign_public_ip)
        .build()
        .map_err(|error| ApiError::new("RunTask", format!("invalid awsvpc settings: {error}")))?;

    let network = NetworkConfiguration::builder()
        .awsvpc_configuration(awsvpc)
        .build();
    Ok(network)
}

/// One container override carrying the command verbatim.
pub fn task_override(request: &TaskLaunchRequest) -> TaskOverride {
    let container = ContainerOverride::builder()
        .name(&request.container_override.name)
        .set_command(Some(request.container_override.command.to_vec()))
        .build();
    TaskOverride::builder()
        .container_overrides(container)
        .build()
}

pub fn run_task_outcome(output: &RunTaskOutput) -> RunTaskOutcome {
    RunTaskOutcome {
        task_arns: output
            .tasks()
            .iter()
            .filter_map(|task| task.task_arn().map(str::to_string))
            .collect(),
        failures: output
            .failures()
            .iter()
            .map(|failure| {
                format!(
                    "{} ({})",
                    failure.reason().unwrap_or("unknown reason"),
                    failure.arn().unwrap_or("no arn")
                )
            })
            .collect(),
    }
}

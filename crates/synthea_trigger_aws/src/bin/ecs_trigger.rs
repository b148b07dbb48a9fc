use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types::LaunchType;
use clap::Parser;
use synthea_trigger_aws::adapters::ecs::{
    network_configuration, run_task_outcome, task_override, TaskLauncher,
};
use synthea_trigger_aws::adapters::network::{ec2_filters, NetworkDirectory};
use synthea_trigger_aws::handlers::entry::{configure, run_ecs_trigger, SUCCESS_EXIT_CODE};
use synthea_trigger_aws::sdk::{block_on_sdk, load_sdk_config};
use synthea_trigger_core::contract::{RunTaskOutcome, TaskLaunchRequest};
use synthea_trigger_core::discovery::LookupFilter;
use synthea_trigger_core::error::ApiError;

const PROGRAM: &str = "ecs_trigger";

#[derive(Parser)]
#[command(
    name = PROGRAM,
    about = "Launch one ECS Fargate task running Synthea with the given parameters",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Parameters forwarded verbatim to the Synthea container
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    params: Vec<String>,
}

struct AwsTaskLauncher {
    client: aws_sdk_ecs::Client,
}

impl TaskLauncher for AwsTaskLauncher {
    fn run_task(&self, request: &TaskLaunchRequest) -> Result<RunTaskOutcome, ApiError> {
        let output = block_on_sdk(
            self.client
                .run_task()
                .cluster(&request.cluster)
                .task_definition(&request.task_definition)
                .launch_type(LaunchType::from(request.launch_type.as_str()))
                .count(request.count)
                .network_configuration(network_configuration(request)?)
                .overrides(task_override(request))
                .send(),
        )
        .map_err(|error| ApiError::new("RunTask", DisplayErrorContext(&error).to_string()))?;

        Ok(run_task_outcome(&output))
    }
}

struct AwsNetworkDirectory {
    client: aws_sdk_ec2::Client,
}

fn ec2_error(operation: &'static str, error: impl std::error::Error) -> ApiError {
    ApiError::new(
        operation,
        aws_sdk_ec2::error::DisplayErrorContext(&error).to_string(),
    )
}

impl NetworkDirectory for AwsNetworkDirectory {
    fn vpc_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
        let output = block_on_sdk(
            self.client
                .describe_vpcs()
                .set_filters(Some(ec2_filters(filters)))
                .send(),
        )
        .map_err(|error| ec2_error("DescribeVpcs", error))?;

        Ok(output
            .vpcs()
            .iter()
            .filter_map(|vpc| vpc.vpc_id().map(str::to_string))
            .collect())
    }

    fn subnet_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
        let output = block_on_sdk(
            self.client
                .describe_subnets()
                .set_filters(Some(ec2_filters(filters)))
                .send(),
        )
        .map_err(|error| ec2_error("DescribeSubnets", error))?;

        Ok(output
            .subnets()
            .iter()
            .filter_map(|subnet| subnet.subnet_id().map(str::to_string))
            .collect())
    }

    fn security_group_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
        let output = block_on_sdk(
            self.client
                .describe_security_groups()
                .set_filters(Some(ec2_filters(filters)))
                .send(),
        )
        .map_err(|error| ec2_error("DescribeSecurityGroups", error))?;

        Ok(output
            .security_groups()
            .iter()
            .filter_map(|group| group.group_id().map(str::to_string))
            .collect())
    }
}

fn connect() -> (AwsTaskLauncher, AwsNetworkDirectory) {
    let config = block_on_sdk(load_sdk_config());
    (
        AwsTaskLauncher {
            client: aws_sdk_ecs::Client::new(&config),
        },
        AwsNetworkDirectory {
            client: aws_sdk_ec2::Client::new(&config),
        },
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    let code = run_ecs_trigger(PROGRAM, cli.params, configure, connect, &mut stdout)?;

    if code != SUCCESS_EXIT_CODE {
        std::process::exit(code);
    }
    Ok(())
}

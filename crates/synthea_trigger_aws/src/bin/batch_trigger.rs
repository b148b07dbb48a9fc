use aws_sdk_batch::error::DisplayErrorContext;
use clap::Parser;
use synthea_trigger_aws::adapters::batch::{container_overrides, submitted_job, JobSubmitter};
use synthea_trigger_aws::handlers::entry::{configure, run_batch_trigger, SUCCESS_EXIT_CODE};
use synthea_trigger_aws::sdk::{block_on_sdk, load_sdk_config};
use synthea_trigger_core::contract::{BatchJobRequest, BatchJobSubmitted};
use synthea_trigger_core::error::ApiError;

const PROGRAM: &str = "batch_trigger";

#[derive(Parser)]
#[command(
    name = PROGRAM,
    about = "Submit one AWS Batch job running Synthea with the given parameters",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Parameters forwarded verbatim to the Synthea container
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    params: Vec<String>,
}

struct AwsBatchSubmitter {
    client: aws_sdk_batch::Client,
}

impl AwsBatchSubmitter {
    fn connect() -> Self {
        let config = block_on_sdk(load_sdk_config());
        Self {
            client: aws_sdk_batch::Client::new(&config),
        }
    }
}

impl JobSubmitter for AwsBatchSubmitter {
    fn submit_job(&self, request: &BatchJobRequest) -> Result<BatchJobSubmitted, ApiError> {
        block_on_sdk(
            self.client
                .submit_job()
                .job_name(request.job_name.as_str())
                .job_queue(&request.job_queue)
                .job_definition(&request.job_definition)
                .container_overrides(container_overrides(request))
                .send(),
        )
        .map(|output| submitted_job(&output))
        .map_err(|error| ApiError::new("SubmitJob", DisplayErrorContext(&error).to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    let code = run_batch_trigger(
        PROGRAM,
        cli.params,
        configure,
        AwsBatchSubmitter::connect,
        &mut stdout,
    )?;

    if code != SUCCESS_EXIT_CODE {
        std::process::exit(code);
    }
    Ok(())
}

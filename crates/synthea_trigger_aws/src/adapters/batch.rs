use aws_sdk_batch::operation::submit_job::SubmitJobOutput;
use aws_sdk_batch::types::ContainerOverrides;
use synthea_trigger_core::contract::{BatchJobRequest, BatchJobSubmitted};
use synthea_trigger_core::error::ApiError;

pub trait JobSubmitter {
    fn submit_job(&self, request: &BatchJobRequest) -> Result<BatchJobSubmitted, ApiError>;
}

/// Replaces the job definition's command; nothing else is overridden.
pub fn container_overrides(request: &BatchJobRequest) -> ContainerOverrides {
    ContainerOverrides::builder()
        .set_command(Some(request.command.to_vec()))
        .build()
}

pub fn submitted_job(output: &SubmitJobOutput) -> BatchJobSubmitted {
    BatchJobSubmitted {
        job_id: output.job_id().to_string(),
        job_name: output.job_name().to_string(),
        job_arn: output.job_arn().map(str::to_string),
    }
}

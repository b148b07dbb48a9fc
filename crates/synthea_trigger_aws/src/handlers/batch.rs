use synthea_trigger_core::config::BatchTarget;
use synthea_trigger_core::contract::{
    batch_job_request, BatchJobSubmitted, CommandOverride, JobName,
};
use synthea_trigger_core::error::TriggerError;
use tracing::info;

use crate::adapters::batch::JobSubmitter;

/// Submits exactly one Batch job. Identical calls create distinct jobs.
pub fn submit_batch_job(
    submitter: &dyn JobSubmitter,
    target: &BatchTarget,
    job_name: JobName,
    command: &CommandOverride,
) -> Result<BatchJobSubmitted, TriggerError> {
    let request = batch_job_request(target, job_name, command);
    info!(
        job_name = %request.job_name,
        job_queue = %request.job_queue,
        job_definition = %request.job_definition,
        "submitting batch job"
    );

    let submitted = submitter.submit_job(&request)?;
    info!(job_id = %submitted.job_id, job_name = %submitted.job_name, "batch job submitted");
    Ok(submitted)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use synthea_trigger_core::contract::BatchJobRequest;
    use synthea_trigger_core::error::ApiError;

    use super::*;

    struct CapturingSubmitter {
        requests: Mutex<Vec<BatchJobRequest>>,
    }

    impl CapturingSubmitter {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<BatchJobRequest> {
            self.requests.lock().expect("poisoned mutex").clone()
        }
    }

    impl JobSubmitter for CapturingSubmitter {
        fn submit_job(&self, request: &BatchJobRequest) -> Result<BatchJobSubmitted, ApiError> {
            let mut requests = self.requests.lock().expect("poisoned mutex");
            requests.push(request.clone());
            Ok(BatchJobSubmitted {
                job_id: format!("job-{}", requests.len()),
                job_name: request.job_name.to_string(),
                job_arn: None,
            })
        }
    }

    struct RejectingSubmitter;

    impl JobSubmitter for RejectingSubmitter {
        fn submit_job(&self, _request: &BatchJobRequest) -> Result<BatchJobSubmitted, ApiError> {
            Err(ApiError::new(
                "SubmitJob",
                "ClientException: JobQueue java-processor-queue not found",
            ))
        }
    }

    fn command(values: &[&str]) -> CommandOverride {
        CommandOverride::new(values.iter().map(|value| value.to_string()).collect())
            .expect("non-empty command")
    }

    #[test]
    fn forwards_parameters_verbatim() {
        let submitter = CapturingSubmitter::new();
        let params = command(&["-p", "1000", "-s", "12345", "-g", "F"]);

        let submitted = submit_batch_job(
            &submitter,
            &BatchTarget::default(),
            JobName::at("synthea-job", 1_760_000_000),
            &params,
        )
        .expect("submission should succeed");

        let requests = submitter.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].job_queue, "java-processor-queue");
        assert_eq!(requests[0].job_definition, "java-processor-job");
        assert_eq!(requests[0].job_name.as_str(), "synthea-job-1760000000");
        assert_eq!(requests[0].command, params);
        assert_eq!(submitted.job_name, "synthea-job-1760000000");
    }

    #[test]
    fn repeated_submissions_are_not_deduplicated() {
        let submitter = CapturingSubmitter::new();
        let params = command(&["-p", "10"]);
        for _ in 0..2 {
            submit_batch_job(
                &submitter,
                &BatchTarget::default(),
                JobName::at("synthea-job", 42),
                &params,
            )
            .expect("submission should succeed");
        }
        assert_eq!(submitter.requests().len(), 2);
    }

    #[test]
    fn api_errors_propagate() {
        let error = submit_batch_job(
            &RejectingSubmitter,
            &BatchTarget::default(),
            JobName::at("synthea-job", 1),
            &command(&["-p", "1"]),
        )
        .expect_err("rejected submission should fail");

        assert!(matches!(error, TriggerError::Api(_)));
        assert!(error.to_string().starts_with("SubmitJob failed:"));
    }
}

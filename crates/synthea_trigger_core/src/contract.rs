use std::fmt;

use chrono::Utc;

use crate::config::{BatchTarget, EcsTarget};

pub const DEFAULT_JOB_QUEUE: &str = "java-processor-queue";
pub const DEFAULT_JOB_DEFINITION: &str = "java-processor-job";
pub const DEFAULT_JOB_NAME_PREFIX: &str = "synthea-job";
pub const DEFAULT_CLUSTER: &str = "java-processor-cluster";
pub const DEFAULT_TASK_DEFINITION: &str = "java-processor-task";
pub const DEFAULT_CONTAINER_NAME: &str = "java-processor";
pub const FARGATE_LAUNCH_TYPE: &str = "FARGATE";
pub const TASKS_PER_LAUNCH: i32 = 1;
pub const MAX_JOB_NAME_LEN: usize = 128;

/// Container command override, forwarded verbatim to the entrypoint.
///
/// Only non-empty sequences can be constructed; the values themselves are
/// never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOverride(Vec<String>);

impl CommandOverride {
    pub fn new(params: Vec<String>) -> Option<Self> {
        if params.is_empty() {
            None
        } else {
            Some(Self(params))
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Batch job name of the form `<prefix>-<unix seconds>`.
///
/// Unique only at one-second granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobName(String);

impl JobName {
    pub fn at(prefix: &str, unix_seconds: i64) -> Self {
        Self(format!("{prefix}-{unix_seconds}"))
    }

    pub fn now(prefix: &str) -> Self {
        Self::at(prefix, Utc::now().timestamp())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, suffix)| suffix.parse().ok())
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJobRequest {
    pub job_name: JobName,
    pub job_queue: String,
    pub job_definition: String,
    pub command: CommandOverride,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJobSubmitted {
    pub job_id: String,
    pub job_name: String,
    pub job_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContext {
    pub subnet_id: String,
    pub security_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerOverride {
    pub name: String,
    pub command: CommandOverride,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLaunchRequest {
    pub cluster: String,
    pub task_definition: String,
    pub launch_type: String,
    pub count: i32,
    pub network: NetworkContext,
    pub assign_public_ip: bool,
    pub container_override: ContainerOverride,
}

/// Raw `RunTask` answer: the call can succeed while launching nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTaskOutcome {
    pub task_arns: Vec<String>,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLaunched {
    pub task_arn: String,
}

impl TaskLaunched {
    pub fn task_id(&self) -> &str {
        task_id_from_arn(&self.task_arn)
    }
}

/// `arn:aws:ecs:<region>:<account>:task/<cluster>/<id>` -> `<id>`.
pub fn task_id_from_arn(task_arn: &str) -> &str {
    task_arn.rsplit('/').next().unwrap_or(task_arn)
}

pub fn batch_job_request(
    target: &BatchTarget,
    job_name: JobName,
    command: &CommandOverride,
) -> BatchJobRequest {
    BatchJobRequest {
        job_name,
        job_queue: target.job_queue.clone(),
        job_definition: target.job_definition.clone(),
        command: command.clone(),
    }
}

pub fn task_launch_request(
    target: &EcsTarget,
    network: NetworkContext,
    command: &CommandOverride,
) -> TaskLaunchRequest {
    TaskLaunchRequest {
        cluster: target.cluster.clone(),
        task_definition: target.task_definition.clone(),
        launch_type: FARGATE_LAUNCH_TYPE.to_string(),
        count: TASKS_PER_LAUNCH,
        network,
        assign_public_ip: target.assign_public_ip,
        container_override: ContainerOverride {
            name: target.container_name.clone(),
            command: command.clone(),
        },
    }
}

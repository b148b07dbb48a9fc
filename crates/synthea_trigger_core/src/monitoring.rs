use std::fmt::Write;

use crate::config::MonitoringConfig;
use crate::contract::{BatchJobSubmitted, CommandOverride, TaskLaunched};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerVariant {
    Batch,
    Ecs,
}

impl TriggerVariant {
    fn service(self) -> &'static str {
        match self {
            Self::Batch => "Batch",
            Self::Ecs => "ECS",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Self::Batch => "job",
            Self::Ecs => "task",
        }
    }
}

pub fn console_path(variant: TriggerVariant, target: &str) -> String {
    match variant {
        TriggerVariant::Batch => format!("Batch > Jobs > {target}"),
        TriggerVariant::Ecs => format!("ECS > Clusters > {target} > Tasks"),
    }
}

pub fn log_group(variant: TriggerVariant, monitoring: &MonitoringConfig) -> &str {
    match variant {
        TriggerVariant::Batch => &monitoring.batch_log_group,
        TriggerVariant::Ecs => &monitoring.ecs_log_group,
    }
}

pub fn status_command(variant: TriggerVariant, target: &str, id: &str) -> String {
    match variant {
        TriggerVariant::Batch => format!("aws batch describe-jobs --jobs {id}"),
        TriggerVariant::Ecs => format!("aws ecs describe-tasks --cluster {target} --tasks {id}"),
    }
}

pub fn usage_text(program: &str) -> String {
    format!(
        "Usage: {program} param1 param2 param3\n\
         Example: {program} -p 100\n\
         \n\
         Common Synthea parameters:\n\
         \x20 -p <number>  : Generate <number> patients\n\
         \x20 -s <seed>    : Random seed for reproducibility\n\
         \x20 -g <gender>  : Generate only M or F patients\n"
    )
}

pub fn submitting_line(variant: TriggerVariant, command: &CommandOverride) -> String {
    let verb = match variant {
        TriggerVariant::Batch => "Submitting",
        TriggerVariant::Ecs => "Launching",
    };
    format!(
        "{verb} {} {} with parameters: {:?}",
        variant.service(),
        variant.unit(),
        command.as_slice()
    )
}

pub fn batch_report(
    monitoring: &MonitoringConfig,
    job_queue: &str,
    submitted: &BatchJobSubmitted,
) -> String {
    let variant = TriggerVariant::Batch;
    let mut report = String::new();
    let _ = writeln!(report, "Job submitted: {}", submitted.job_name);
    let _ = writeln!(report, "Job ID: {}", submitted.job_id);
    push_guidance(
        &mut report,
        variant,
        monitoring,
        job_queue,
        &submitted.job_id,
    );
    report
}

pub fn ecs_report(monitoring: &MonitoringConfig, cluster: &str, launched: &TaskLaunched) -> String {
    let variant = TriggerVariant::Ecs;
    let mut report = String::new();
    let _ = writeln!(report, "Task started: {}", launched.task_arn);
    let _ = writeln!(report, "Task ID: {}", launched.task_id());
    push_guidance(
        &mut report,
        variant,
        monitoring,
        cluster,
        launched.task_id(),
    );
    report
}

fn push_guidance(
    report: &mut String,
    variant: TriggerVariant,
    monitoring: &MonitoringConfig,
    target: &str,
    id: &str,
) {
    let _ = writeln!(report, "\nMonitor {} progress:", variant.unit());
    let _ = writeln!(report, "  - AWS Console: {}", console_path(variant, target));
    let _ = writeln!(
        report,
        "  - CloudWatch Logs: {}",
        log_group(variant, monitoring)
    );
    let _ = writeln!(
        report,
        "  - S3 Output: Check your {} bucket",
        monitoring.output_bucket_pattern
    );
    let _ = writeln!(report, "\nCheck {} status:", variant.unit());
    let _ = writeln!(report, "  {}", status_command(variant, target, id));
}

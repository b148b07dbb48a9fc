//! CLI entry flow shared by the trigger binaries.
//!
//! Arguments are an opaque parameter sequence for the Synthea container. An
//! empty sequence prints usage and yields [`USAGE_EXIT_CODE`] without loading
//! configuration, building any client or calling any API.

use std::io::Write;

use anyhow::Context;
use synthea_trigger_core::config::{load_config, TriggerConfig};
use synthea_trigger_core::contract::{CommandOverride, JobName};
use synthea_trigger_core::monitoring::{
    batch_report, ecs_report, submitting_line, usage_text, TriggerVariant,
};

use crate::adapters::batch::JobSubmitter;
use crate::adapters::ecs::TaskLauncher;
use crate::adapters::network::NetworkDirectory;
use crate::handlers::batch::submit_batch_job;
use crate::handlers::ecs::launch_task;
use crate::telemetry::init_tracing;

pub const SUCCESS_EXIT_CODE: i32 = 0;
pub const USAGE_EXIT_CODE: i32 = 1;

/// Loads the layered config and installs the subscriber it describes.
pub fn configure() -> anyhow::Result<TriggerConfig> {
    let config = load_config().context("failed to load trigger configuration")?;
    init_tracing(&config.log);
    Ok(config)
}

pub fn run_batch_trigger<S, C, F, W>(
    program: &str,
    args: Vec<String>,
    load: C,
    connect: F,
    out: &mut W,
) -> anyhow::Result<i32>
where
    S: JobSubmitter,
    C: FnOnce() -> anyhow::Result<TriggerConfig>,
    F: FnOnce() -> S,
    W: Write,
{
    let Some(command) = CommandOverride::new(args) else {
        write!(out, "{}", usage_text(program))?;
        return Ok(USAGE_EXIT_CODE);
    };
    let config = load()?;

    writeln!(out, "{}", submitting_line(TriggerVariant::Batch, &command))?;
    let submitter = connect();
    let submitted = submit_batch_job(
        &submitter,
        &config.batch,
        JobName::now(&config.batch.job_name_prefix),
        &command,
    )?;

    write!(
        out,
        "{}",
        batch_report(&config.monitoring, &config.batch.job_queue, &submitted)
    )?;
    Ok(SUCCESS_EXIT_CODE)
}

pub fn run_ecs_trigger<L, D, C, F, W>(
    program: &str,
    args: Vec<String>,
    load: C,
    connect: F,
    out: &mut W,
) -> anyhow::Result<i32>
where
    L: TaskLauncher,
    D: NetworkDirectory,
    C: FnOnce() -> anyhow::Result<TriggerConfig>,
    F: FnOnce() -> (L, D),
    W: Write,
{
    let Some(command) = CommandOverride::new(args) else {
        write!(out, "{}", usage_text(program))?;
        return Ok(USAGE_EXIT_CODE);
    };
    let config = load()?;

    writeln!(out, "{}", submitting_line(TriggerVariant::Ecs, &command))?;
    let (launcher, directory) = connect();
    let launched = launch_task(
        &launcher,
        &directory,
        &config.ecs,
        &config.discovery,
        &command,
    )?;

    write!(
        out,
        "{}",
        ecs_report(&config.monitoring, &config.ecs.cluster, &launched)
    )?;
    Ok(SUCCESS_EXIT_CODE)
}

use std::collections::{BTreeMap, HashMap};

use super::{LogFormat, TriggerConfig};
use crate::discovery::SelectionPolicy;
use crate::error::ConfigError;

pub const ENV_PREFIX: &str = "SYNTHEA_TRIGGER_";

/// Abstraction over environment-variable lookups so tests can supply maps.
pub trait EnvSource {
    /// Lookup without any prefix (`VPC_ID`, `CDK_DEFAULT_REGION`, ...).
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Lookup of a `SYNTHEA_TRIGGER_`-prefixed key.
    fn get(&self, key: &str) -> Option<String> {
        self.get_raw(&format!("{ENV_PREFIX}{key}"))
    }
}

pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get_raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Apply environment-variable overrides (highest priority) to the config.
pub fn apply_env_overrides<E: EnvSource + ?Sized>(
    config: &mut TriggerConfig,
    env: &E,
) -> Result<(), ConfigError> {
    if let Some(value) = get_env_string(env, "JOB_QUEUE") {
        config.batch.job_queue = value;
    }
    if let Some(value) = get_env_string(env, "JOB_DEFINITION") {
        config.batch.job_definition = value;
    }
    if let Some(value) = get_env_string(env, "JOB_NAME_PREFIX") {
        config.batch.job_name_prefix = value;
    }

    if let Some(value) = get_env_string(env, "CLUSTER") {
        config.ecs.cluster = value;
    }
    if let Some(value) = get_env_string(env, "TASK_DEFINITION") {
        config.ecs.task_definition = value;
    }
    if let Some(value) = get_env_string(env, "CONTAINER_NAME") {
        config.ecs.container_name = value;
    }
    if let Some(value) = get_env_bool(env, "ASSIGN_PUBLIC_IP")? {
        config.ecs.assign_public_ip = value;
    }

    if let Some(value) = get_env_string(env, "SECURITY_GROUP_PATTERN") {
        config.discovery.security_group_pattern = value;
    }
    if let Some(value) = get_env_string(env, "SELECTION_POLICY") {
        config.discovery.selection = value
            .parse::<SelectionPolicy>()
            .map_err(|message| invalid(env_key("SELECTION_POLICY"), message))?;
    }
    if let Some(value) = get_env_string(env, "SUBNET_ID") {
        config.discovery.subnet_id = Some(value);
    }
    if let Some(value) = get_env_string(env, "SECURITY_GROUP_ID") {
        config.discovery.security_group_id = Some(value);
    }

    if let Some(value) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = value;
    }
    if let Some(value) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = value
            .parse::<LogFormat>()
            .map_err(|message| invalid(env_key("LOG_FORMAT"), message))?;
    }

    Ok(())
}

fn env_key(key: &str) -> String {
    format!("{ENV_PREFIX}{key}")
}

fn invalid(key: String, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnv {
        key,
        message: message.into(),
    }
}

fn get_env_string<E: EnvSource + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn get_env_bool<E: EnvSource + ?Sized>(env: &E, key: &str) -> Result<Option<bool>, ConfigError> {
    match get_env_string(env, key) {
        None => Ok(None),
        Some(value) => match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "enabled" => Ok(Some(true)),
            "0" | "false" | "no" | "off" | "disabled" => Ok(Some(false)),
            _ => Err(invalid(env_key(key), format!("'{value}' is not a boolean"))),
        },
    }
}

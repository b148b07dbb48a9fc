// Trigger configuration
//
// Sources, lowest to highest priority:
// 1. Built-in defaults (the resource names the stack deploys)
// 2. TOML file from SYNTHEA_TRIGGER_CONFIG, else ./synthea-trigger.toml
// 3. Environment variables (SYNTHEA_TRIGGER_* prefix)

use serde::{Deserialize, Serialize};

use crate::contract::{
    DEFAULT_CLUSTER, DEFAULT_CONTAINER_NAME, DEFAULT_JOB_DEFINITION, DEFAULT_JOB_NAME_PREFIX,
    DEFAULT_JOB_QUEUE, DEFAULT_TASK_DEFINITION,
};
use crate::discovery::{SelectionPolicy, DEFAULT_SECURITY_GROUP_PATTERN};
use crate::error::ConfigError;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, StdEnvSource, ENV_PREFIX};
pub use sources::{load_config, load_config_from, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub batch: BatchTarget,
    pub ecs: EcsTarget,
    pub discovery: DiscoveryConfig,
    pub monitoring: MonitoringConfig,
    pub log: LogConfig,
}

impl TriggerConfig {
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}

/// Batch queue and job definition the trigger submits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchTarget {
    pub job_queue: String,
    pub job_definition: String,
    pub job_name_prefix: String,
}

impl Default for BatchTarget {
    fn default() -> Self {
        Self {
            job_queue: DEFAULT_JOB_QUEUE.to_string(),
            job_definition: DEFAULT_JOB_DEFINITION.to_string(),
            job_name_prefix: DEFAULT_JOB_NAME_PREFIX.to_string(),
        }
    }
}

/// ECS cluster, task definition and container the trigger launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsTarget {
    pub cluster: String,
    pub task_definition: String,
    pub container_name: String,
    /// Fargate tasks without a NAT gateway need a public IP to pull the
    /// image and reach S3.
    pub assign_public_ip: bool,
}

impl Default for EcsTarget {
    fn default() -> Self {
        Self {
            cluster: DEFAULT_CLUSTER.to_string(),
            task_definition: DEFAULT_TASK_DEFINITION.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            assign_public_ip: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub security_group_pattern: String,
    pub selection: SelectionPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_id: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            security_group_pattern: DEFAULT_SECURITY_GROUP_PATTERN.to_string(),
            selection: SelectionPolicy::default(),
            subnet_id: None,
            security_group_id: None,
        }
    }
}

/// Locations printed after a submission so the caller can follow the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub batch_log_group: String,
    pub ecs_log_group: String,
    pub output_bucket_pattern: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            batch_log_group: "/aws/batch/java-processor".to_string(),
            ecs_log_group: "/ecs/java-processor".to_string(),
            output_bucket_pattern: "synthea-output-*".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unsupported log format '{other}' (expected 'text' or 'json')"
            )),
        }
    }
}

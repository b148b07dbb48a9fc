// Validates resource names before any remote call is made.

use tracing::warn;

use super::{BatchTarget, DiscoveryConfig, EcsTarget, TriggerConfig};
use crate::contract::MAX_JOB_NAME_LEN;
use crate::error::ConfigError;

// Room left for `-<unix seconds>`.
const JOB_NAME_SUFFIX_LEN: usize = 21;

pub fn validate_config(config: &TriggerConfig) -> Result<(), ConfigError> {
    validate_batch_target(&config.batch)?;
    validate_ecs_target(&config.ecs)?;
    validate_discovery(&config.discovery)?;
    Ok(())
}

fn validate_batch_target(target: &BatchTarget) -> Result<(), ConfigError> {
    require_non_empty("batch.job_queue", &target.job_queue)?;
    require_non_empty("batch.job_definition", &target.job_definition)?;
    require_non_empty("batch.job_name_prefix", &target.job_name_prefix)?;

    if let Some(invalid) = target
        .job_name_prefix
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ConfigError::Invalid(format!(
            "batch.job_name_prefix contains '{invalid}'; only letters, digits, '-' and '_' are allowed"
        )));
    }

    if !target
        .job_name_prefix
        .starts_with(|c: char| c.is_ascii_alphanumeric())
    {
        return Err(ConfigError::Invalid(
            "batch.job_name_prefix must start with a letter or digit".to_string(),
        ));
    }

    if target.job_name_prefix.len() + JOB_NAME_SUFFIX_LEN > MAX_JOB_NAME_LEN {
        return Err(ConfigError::Invalid(format!(
            "batch.job_name_prefix must be at most {} characters",
            MAX_JOB_NAME_LEN - JOB_NAME_SUFFIX_LEN
        )));
    }

    Ok(())
}

fn validate_ecs_target(target: &EcsTarget) -> Result<(), ConfigError> {
    require_non_empty("ecs.cluster", &target.cluster)?;
    require_non_empty("ecs.task_definition", &target.task_definition)?;
    require_non_empty("ecs.container_name", &target.container_name)?;

    if !target.assign_public_ip {
        warn!("ecs.assign_public_ip is disabled; tasks need a NAT gateway to pull images and reach S3");
    }

    Ok(())
}

fn validate_discovery(discovery: &DiscoveryConfig) -> Result<(), ConfigError> {
    require_non_empty(
        "discovery.security_group_pattern",
        &discovery.security_group_pattern,
    )?;

    for (field, value) in [
        ("discovery.subnet_id", &discovery.subnet_id),
        ("discovery.security_group_id", &discovery.security_group_id),
    ] {
        if let Some(id) = value {
            require_non_empty(field, id)?;
        }
    }

    if !discovery.security_group_pattern.contains('*') {
        warn!(
            pattern = %discovery.security_group_pattern,
            "discovery.security_group_pattern has no wildcard and only matches the exact group name"
        );
    }

    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&TriggerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_empty_queue_name() {
        let mut config = TriggerConfig::default();
        config.batch.job_queue = " ".to_string();
        let error = validate_config(&config).expect_err("empty queue should fail");
        assert_eq!(error.to_string(), "batch.job_queue cannot be empty");
    }

    #[test]
    fn rejects_prefix_batch_would_refuse() {
        let mut config = TriggerConfig::default();
        config.batch.job_name_prefix = "synthea job".to_string();
        assert!(validate_config(&config).is_err());

        config.batch.job_name_prefix = "x".repeat(MAX_JOB_NAME_LEN);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_prefix_with_leading_separator() {
        let mut config = TriggerConfig::default();
        for prefix in ["-synthea", "_synthea"] {
            config.batch.job_name_prefix = prefix.to_string();
            let error = validate_config(&config).expect_err("leading separator should fail");
            assert_eq!(
                error.to_string(),
                "batch.job_name_prefix must start with a letter or digit"
            );
        }

        config.batch.job_name_prefix = "9-synthea_job".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_blank_pinned_subnet() {
        let mut config = TriggerConfig::default();
        config.discovery.subnet_id = Some(String::new());
        let error = validate_config(&config).expect_err("blank subnet should fail");
        assert_eq!(error.to_string(), "discovery.subnet_id cannot be empty");
    }
}

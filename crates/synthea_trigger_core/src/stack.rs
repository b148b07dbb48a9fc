//! Deployment settings handed to the infrastructure (CDK) layer.
//!
//! Each optional setting is taken from a CDK context parameter first, then an
//! environment variable, else left unset so the stack applies its default.

use std::collections::BTreeMap;

use crate::config::EnvSource;

pub const DEFAULT_STACK_NAME: &str = "BatchJavaProcessorStack";
pub const STACK_DESCRIPTION: &str =
    "AWS Batch job for running Synthea Java application with S3 output";

pub const VPC_ID_CONTEXT: &str = "vpc_id";
pub const S3_BUCKET_CONTEXT: &str = "s3_bucket_name";
pub const VPC_ID_ENV: &str = "VPC_ID";
pub const S3_BUCKET_ENV: &str = "S3_BUCKET_NAME";
pub const ACCOUNT_ENV: &str = "CDK_DEFAULT_ACCOUNT";
pub const REGION_ENV: &str = "CDK_DEFAULT_REGION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSettings {
    pub stack_name: String,
    pub description: String,
    /// `None` deploys into the account's default VPC.
    pub vpc_id: Option<String>,
    /// `None` lets the stack create its own output bucket.
    pub s3_bucket_name: Option<String>,
    pub account: Option<String>,
    pub region: Option<String>,
}

impl StackSettings {
    pub fn resolve<E: EnvSource + ?Sized>(context: &BTreeMap<String, String>, env: &E) -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            description: STACK_DESCRIPTION.to_string(),
            vpc_id: context_or_env(context, VPC_ID_CONTEXT, env, VPC_ID_ENV),
            s3_bucket_name: context_or_env(context, S3_BUCKET_CONTEXT, env, S3_BUCKET_ENV),
            account: non_blank(env.get_raw(ACCOUNT_ENV)),
            region: non_blank(env.get_raw(REGION_ENV)),
        }
    }

    /// `-c key=value` pairs for the resolved optional settings.
    pub fn context_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (key, value) in [
            (VPC_ID_CONTEXT, &self.vpc_id),
            (S3_BUCKET_CONTEXT, &self.s3_bucket_name),
        ] {
            if let Some(value) = value {
                args.push("-c".to_string());
                args.push(format!("{key}={value}"));
            }
        }
        args
    }
}

/// Parses one `key=value` context parameter.
pub fn parse_context_pair(raw: &str) -> Result<(String, String), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!(
            "context parameter '{raw}' must look like key=value"
        ));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("context parameter '{raw}' has an empty key"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn context_or_env<E: EnvSource + ?Sized>(
    context: &BTreeMap<String, String>,
    context_key: &str,
    env: &E,
    env_key: &str,
) -> Option<String> {
    non_blank(context.get(context_key).cloned()).or_else(|| non_blank(env.get_raw(env_key)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

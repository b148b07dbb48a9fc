use std::fmt;

use thiserror::Error;

/// Remote call failure. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct ApiError {
    pub operation: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    DefaultVpc,
    Subnet,
    SecurityGroup,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultVpc => f.write_str("default VPC"),
            Self::Subnet => f.write_str("subnet"),
            Self::SecurityGroup => f.write_str("security group"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("no {resource} found for {scope}")]
    NotFound {
        resource: ResourceKind,
        scope: String,
    },
    #[error("expected exactly one {resource} for {scope}, found {count}")]
    Ambiguous {
        resource: ResourceKind,
        scope: String,
        count: usize,
    },
}

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("RunTask launched no task: {}", .failures.join("; "))]
    LaunchRejected { failures: Vec<String> },
    #[error("{operation} response did not include {field}")]
    MissingIdentifier {
        operation: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {message}")]
    InvalidEnv { key: String, message: String },
    #[error("{0}")]
    Invalid(String),
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, ResourceKind};

pub const DEFAULT_SECURITY_GROUP_PATTERN: &str = "*java-processor*";

/// How a lookup result list is reduced to one id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Take the first element as returned by the API.
    #[default]
    First,
    /// Refuse lists with more than one element.
    ExactlyOne,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::ExactlyOne => f.write_str("exactly-one"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "exactly-one" | "exactly_one" | "single" => Ok(Self::ExactlyOne),
            other => Err(format!(
                "unsupported selection policy '{other}' (expected 'first' or 'exactly-one')"
            )),
        }
    }
}

/// Name/values pair of an EC2 describe filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFilter {
    pub name: &'static str,
    pub values: Vec<String>,
}

impl LookupFilter {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            values: vec![value.into()],
        }
    }
}

impl fmt::Display for LookupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.values.join(","))
    }
}

pub fn default_vpc_filters() -> Vec<LookupFilter> {
    vec![LookupFilter::new("isDefault", "true")]
}

pub fn subnet_filters(vpc_id: &str) -> Vec<LookupFilter> {
    vec![LookupFilter::new("vpc-id", vpc_id)]
}

pub fn security_group_filters(vpc_id: &str, name_pattern: &str) -> Vec<LookupFilter> {
    vec![
        LookupFilter::new("vpc-id", vpc_id),
        LookupFilter::new("group-name", name_pattern),
    ]
}

pub fn describe_scope(filters: &[LookupFilter]) -> String {
    filters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn select_one(
    resource: ResourceKind,
    filters: &[LookupFilter],
    candidates: Vec<String>,
    policy: SelectionPolicy,
) -> Result<String, DiscoveryError> {
    let count = candidates.len();
    if policy == SelectionPolicy::ExactlyOne && count > 1 {
        return Err(DiscoveryError::Ambiguous {
            resource,
            scope: describe_scope(filters),
            count,
        });
    }

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| DiscoveryError::NotFound {
            resource,
            scope: describe_scope(filters),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn first_policy_takes_leading_candidate() {
        let selected = select_one(
            ResourceKind::Subnet,
            &subnet_filters("vpc-1"),
            ids(&["subnet-b", "subnet-a"]),
            SelectionPolicy::First,
        )
        .expect("selection should succeed");
        assert_eq!(selected, "subnet-b");
    }

    #[test]
    fn exactly_one_rejects_multiple_matches() {
        let error = select_one(
            ResourceKind::SecurityGroup,
            &security_group_filters("vpc-1", DEFAULT_SECURITY_GROUP_PATTERN),
            ids(&["sg-1", "sg-2"]),
            SelectionPolicy::ExactlyOne,
        )
        .expect_err("ambiguous match should fail");

        assert_eq!(
            error,
            DiscoveryError::Ambiguous {
                resource: ResourceKind::SecurityGroup,
                scope: "vpc-id=vpc-1 group-name=*java-processor*".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn empty_list_is_not_found_under_every_policy() {
        for policy in [SelectionPolicy::First, SelectionPolicy::ExactlyOne] {
            let error = select_one(
                ResourceKind::DefaultVpc,
                &default_vpc_filters(),
                Vec::new(),
                policy,
            )
            .expect_err("empty list should fail");
            assert_eq!(error.to_string(), "no default VPC found for isDefault=true");
        }
    }

    #[test]
    fn parses_selection_policy_names() {
        assert_eq!(
            "first".parse::<SelectionPolicy>(),
            Ok(SelectionPolicy::First)
        );
        assert_eq!(
            "Exactly-One".parse::<SelectionPolicy>(),
            Ok(SelectionPolicy::ExactlyOne)
        );
        assert!("random".parse::<SelectionPolicy>().is_err());
    }
}

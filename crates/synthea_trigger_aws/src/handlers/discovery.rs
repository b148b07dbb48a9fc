use synthea_trigger_core::config::DiscoveryConfig;
use synthea_trigger_core::contract::NetworkContext;
use synthea_trigger_core::discovery::{
    default_vpc_filters, security_group_filters, select_one, subnet_filters,
};
use synthea_trigger_core::error::{ResourceKind, TriggerError};
use tracing::debug;

use crate::adapters::network::NetworkDirectory;

/// Resolves the subnet and security group a Fargate task is launched into.
///
/// Pinned ids from the config are used as-is; anything else is looked up in
/// the account's default VPC. Lookups are never retried.
pub fn discover_network(
    directory: &dyn NetworkDirectory,
    config: &DiscoveryConfig,
) -> Result<NetworkContext, TriggerError> {
    if let (Some(subnet_id), Some(security_group_id)) =
        (&config.subnet_id, &config.security_group_id)
    {
        debug!(%subnet_id, %security_group_id, "using pinned network context");
        return Ok(NetworkContext {
            subnet_id: subnet_id.clone(),
            security_group_id: security_group_id.clone(),
        });
    }

    let vpc_filters = default_vpc_filters();
    let vpc_id = select_one(
        ResourceKind::DefaultVpc,
        &vpc_filters,
        directory.vpc_ids(&vpc_filters)?,
        config.selection,
    )?;
    debug!(%vpc_id, "resolved default VPC");

    let subnet_id = match &config.subnet_id {
        Some(subnet_id) => subnet_id.clone(),
        None => {
            let filters = subnet_filters(&vpc_id);
            select_one(
                ResourceKind::Subnet,
                &filters,
                directory.subnet_ids(&filters)?,
                config.selection,
            )?
        }
    };
    debug!(%subnet_id, "resolved subnet");

    let security_group_id = match &config.security_group_id {
        Some(security_group_id) => security_group_id.clone(),
        None => {
            let filters = security_group_filters(&vpc_id, &config.security_group_pattern);
            select_one(
                ResourceKind::SecurityGroup,
                &filters,
                directory.security_group_ids(&filters)?,
                config.selection,
            )?
        }
    };
    debug!(%security_group_id, "resolved security group");

    Ok(NetworkContext {
        subnet_id,
        security_group_id,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use synthea_trigger_core::discovery::{LookupFilter, SelectionPolicy};
    use synthea_trigger_core::error::{ApiError, DiscoveryError};

    use super::*;

    struct StaticDirectory {
        vpcs: Vec<String>,
        subnets: Vec<String>,
        security_groups: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticDirectory {
        fn new(vpcs: &[&str], subnets: &[&str], security_groups: &[&str]) -> Self {
            Self {
                vpcs: owned(vpcs),
                subnets: owned(subnets),
                security_groups: owned(security_groups),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, operation: &str, filters: &[LookupFilter]) {
            let scope = filters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("{operation} {scope}"));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    impl NetworkDirectory for StaticDirectory {
        fn vpc_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
            self.record("DescribeVpcs", filters);
            Ok(self.vpcs.clone())
        }

        fn subnet_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
            self.record("DescribeSubnets", filters);
            Ok(self.subnets.clone())
        }

        fn security_group_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
            self.record("DescribeSecurityGroups", filters);
            Ok(self.security_groups.clone())
        }
    }

    struct FailingDirectory;

    impl NetworkDirectory for FailingDirectory {
        fn vpc_ids(&self, _filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
            Err(ApiError::new("DescribeVpcs", "UnauthorizedOperation"))
        }

        fn subnet_ids(&self, _filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
            unreachable!("subnets must not be listed after a failed VPC lookup")
        }

        fn security_group_ids(&self, _filters: &[LookupFilter]) -> Result<Vec<String>, ApiError> {
            unreachable!("security groups must not be listed after a failed VPC lookup")
        }
    }

    #[test]
    fn returns_single_subnet_and_security_group() {
        let directory = StaticDirectory::new(&["vpc-1"], &["subnet-abc"], &["sg-xyz"]);
        let network = discover_network(&directory, &DiscoveryConfig::default())
            .expect("discovery should succeed");

        assert_eq!(
            network,
            NetworkContext {
                subnet_id: "subnet-abc".to_string(),
                security_group_id: "sg-xyz".to_string(),
            }
        );
        assert_eq!(
            directory.calls(),
            vec![
                "DescribeVpcs isDefault=true",
                "DescribeSubnets vpc-id=vpc-1",
                "DescribeSecurityGroups vpc-id=vpc-1 group-name=*java-processor*",
            ]
        );
    }

    #[test]
    fn empty_subnet_listing_is_an_error() {
        let directory = StaticDirectory::new(&["vpc-1"], &[], &["sg-xyz"]);
        let error = discover_network(&directory, &DiscoveryConfig::default())
            .expect_err("missing subnet should fail");

        assert!(matches!(
            error,
            TriggerError::Discovery(DiscoveryError::NotFound {
                resource: ResourceKind::Subnet,
                ..
            })
        ));
        assert_eq!(error.to_string(), "no subnet found for vpc-id=vpc-1");
    }

    #[test]
    fn missing_default_vpc_stops_before_subnet_lookup() {
        let directory = StaticDirectory::new(&[], &["subnet-abc"], &["sg-xyz"]);
        let error = discover_network(&directory, &DiscoveryConfig::default())
            .expect_err("missing default VPC should fail");

        assert_eq!(error.to_string(), "no default VPC found for isDefault=true");
        assert_eq!(directory.calls(), vec!["DescribeVpcs isDefault=true"]);
    }

    #[test]
    fn first_policy_picks_first_of_many() {
        let directory =
            StaticDirectory::new(&["vpc-1"], &["subnet-a", "subnet-b"], &["sg-1", "sg-2"]);
        let network = discover_network(&directory, &DiscoveryConfig::default())
            .expect("discovery should succeed");
        assert_eq!(network.subnet_id, "subnet-a");
        assert_eq!(network.security_group_id, "sg-1");
    }

    #[test]
    fn exactly_one_policy_rejects_multiple_subnets() {
        let directory = StaticDirectory::new(&["vpc-1"], &["subnet-a", "subnet-b"], &["sg-1"]);
        let config = DiscoveryConfig {
            selection: SelectionPolicy::ExactlyOne,
            ..DiscoveryConfig::default()
        };
        let error = discover_network(&directory, &config).expect_err("ambiguous subnet");
        assert_eq!(
            error.to_string(),
            "expected exactly one subnet for vpc-id=vpc-1, found 2"
        );
    }

    #[test]
    fn pinned_ids_skip_all_lookups() {
        let config = DiscoveryConfig {
            subnet_id: Some("subnet-pinned".to_string()),
            security_group_id: Some("sg-pinned".to_string()),
            ..DiscoveryConfig::default()
        };
        let network =
            discover_network(&FailingDirectory, &config).expect("pinned ids need no lookup");
        assert_eq!(network.subnet_id, "subnet-pinned");
        assert_eq!(network.security_group_id, "sg-pinned");
    }

    #[test]
    fn pinned_subnet_still_discovers_security_group() {
        let directory = StaticDirectory::new(&["vpc-1"], &[], &["sg-xyz"]);
        let config = DiscoveryConfig {
            subnet_id: Some("subnet-pinned".to_string()),
            ..DiscoveryConfig::default()
        };
        let network = discover_network(&directory, &config).expect("discovery should succeed");

        assert_eq!(network.subnet_id, "subnet-pinned");
        assert_eq!(network.security_group_id, "sg-xyz");
        assert_eq!(directory.calls().len(), 2);
    }

    #[test]
    fn api_failures_propagate_unchanged() {
        let error = discover_network(&FailingDirectory, &DiscoveryConfig::default())
            .expect_err("api failure should propagate");
        assert!(matches!(error, TriggerError::Api(_)));
        assert_eq!(
            error.to_string(),
            "DescribeVpcs failed: UnauthorizedOperation"
        );
    }
}

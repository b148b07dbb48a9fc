use aws_sdk_ec2::types::Filter;
use synthea_trigger_core::discovery::LookupFilter;
use synthea_trigger_core::error::ApiError;

/// EC2 describe calls, first page only, ids in API order.
pub trait NetworkDirectory {
    fn vpc_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError>;
    fn subnet_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError>;
    fn security_group_ids(&self, filters: &[LookupFilter]) -> Result<Vec<String>, ApiError>;
}

pub fn ec2_filters(filters: &[LookupFilter]) -> Vec<Filter> {
    filters
        .iter()
        .map(|filter| {
            Filter::builder()
                .name(filter.name)
                .set_values(Some(filter.values.clone()))
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use synthea_trigger_core::discovery::security_group_filters;

    use super::*;

    #[test]
    fn filters_keep_names_values_and_order() {
        let filters = ec2_filters(&security_group_filters("vpc-1", "*java-processor*"));

        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].name(), Some("vpc-id"));
        assert_eq!(filters[0].values(), ["vpc-1"]);
        assert_eq!(filters[1].name(), Some("group-name"));
        assert_eq!(filters[1].values(), ["*java-processor*"]);
    }
}

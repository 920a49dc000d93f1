use crate::config::PLACEHOLDER;
use crate::inventory::Subnet;
use crate::migrate::AccountInfo;
use crate::selector::{partition_subnets, select_primary};

pub const NO_PRIMARY_VPC: &str = "// No suitable VPC found.";

/// `deploy-tools` -> `DeployTools`. Only ASCII letters are case-mapped and
/// empty segments are dropped.
pub fn camel_case(name: &str) -> String {
    name.split('-')
        .fold(String::with_capacity(name.len()), |mut acc, segment| {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                acc.push(first.to_ascii_uppercase());
                acc.push_str(chars.as_str());
            }

            return acc;
        })
}

fn subnets_as_typescript_array(subnets: &[&Subnet]) -> String {
    let ids: Vec<String> = subnets
        .iter()
        .map(|subnet| format!("'{}'", subnet.subnet_id))
        .collect();

    return format!("[{}]", ids.join(", "));
}

fn vpc_block(info: &AccountInfo) -> String {
    let primary = match select_primary(&info.vpcs) {
        Some(vpc) => vpc,
        None => {
            tracing::debug!(account = %info.account_name, "no primary vpc candidate");
            return NO_PRIMARY_VPC.to_string();
        }
    };

    tracing::debug!(account = %info.account_name, vpc = %primary.vpc_id, "selected primary vpc");
    let (public, private) = partition_subnets(&primary.subnets);

    return format!(
        "vpc: {{
    primary: {{
        privateSubnets: {}
        publicSubnets: {}
    }}
}}",
        subnets_as_typescript_array(&private),
        subnets_as_typescript_array(&public)
    );
}

/// Renders the `AwsAccountSetupProps` module for one account. Input is
/// rendered verbatim; nothing here can fail.
pub fn render(info: &AccountInfo) -> String {
    let name = camel_case(&info.account_name);
    let artifact_bucket = info.bucket_for_artifact.as_deref().unwrap_or(PLACEHOLDER);
    let private_config_bucket = info
        .bucket_for_private_config
        .as_deref()
        .unwrap_or(PLACEHOLDER);

    return format!(
        "import type {{ AwsAccountSetupProps }} from '../types';

export const {name}Account: AwsAccountSetupProps = {{
    accountNumber: '{number}',
    accountName: '{raw_name}',
    stack: '{name}',
    bucketForArtifacts: '{artifact_bucket}',
    bucketForPrivateConfig: '{private_config_bucket}',
    logging: {{
    streamName: '{stream}',
    {vpc}
}}
",
        name = name,
        number = info.account_number,
        raw_name = info.account_name,
        artifact_bucket = artifact_bucket,
        private_config_bucket = private_config_bucket,
        stream = info.logging.stream_name,
        vpc = vpc_block(info),
    );
}

use std::collections::HashMap;

use crate::config::{Config, PLACEHOLDER};
use crate::inventory::{self, Account, Inventory, Vpc};
use crate::template;
use crate::writer::Document;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Inventory error: {0}")]
    InventoryError(#[from] inventory::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Logging {
    pub stream_name: String,
}

/// Everything rendered for one account. `vpcs` only ever holds VPCs owned by
/// the account and is empty rather than missing when there are none.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub account_number: String,
    pub account_name: String,
    /// Placeholder only; the rendered `stack` line uses the camel-cased name.
    pub stack: String,
    pub bucket_for_artifact: Option<String>,
    pub bucket_for_private_config: Option<String>,
    pub logging: Logging,
    pub vpcs: Vec<Vpc>,
}

pub fn group_by_account(vpcs: Vec<Vpc>) -> HashMap<String, Vec<Vpc>> {
    vpcs.into_iter().fold(HashMap::new(), |mut acc, vpc| {
        acc.entry(vpc.account_id.clone()).or_insert_with(Vec::new).push(vpc);

        return acc;
    })
}

pub fn build_account_infos(
    accounts: Vec<Account>,
    vpcs: Vec<Vpc>,
    config: &Config,
) -> Vec<AccountInfo> {
    let vpcs_by_account = group_by_account(vpcs);
    let placeholders = &config.placeholders;

    accounts
        .into_iter()
        .filter(|account| config.should_migrate(&account.account_name))
        .map(|account| {
            let vpcs = vpcs_by_account
                .get(&account.account_number)
                .cloned()
                .unwrap_or_default();
            tracing::debug!(
                account = %account.account_name,
                vpcs = vpcs.len(),
                "migrating account"
            );

            AccountInfo {
                account_number: account.account_number,
                account_name: account.account_name,
                stack: PLACEHOLDER.to_string(),
                bucket_for_artifact: Some(placeholders.artifact_bucket.clone()),
                bucket_for_private_config: Some(placeholders.private_config_bucket.clone()),
                logging: Logging {
                    stream_name: placeholders.log_stream.clone(),
                },
                vpcs,
            }
        })
        .collect()
}

/// Fetches the inventory and renders one document per allow-listed account,
/// in inventory order. A failed fetch aborts before anything is rendered.
pub async fn run(
    inventory: &(impl Inventory + Sync),
    config: &Config,
) -> Result<Vec<Document>, Error> {
    let (accounts, vpcs) =
        futures::try_join!(inventory.fetch_accounts(), inventory.fetch_vpcs())?;

    let infos = build_account_infos(accounts, vpcs, config);
    tracing::info!(accounts = infos.len(), "rendering account modules");

    let documents = infos
        .iter()
        .map(|info| {
            tracing::debug!(account = %info.account_name, stack = %info.stack, "rendering");

            Document {
                file_name: format!("{}.ts", template::camel_case(&info.account_name)),
                contents: template::render(info),
            }
        })
        .collect();

    return Ok(documents);
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unable to reach inventory at {url}: {reason}.")]
    Unavailable { url: String, reason: String },

    #[error("Unable to parse inventory response from {url}: {reason}.")]
    Malformed { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    pub subnet_id: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    pub vpc_id: String,
    pub account_id: String,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub subnets: Vec<Subnet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: String,
    pub account_name: String,
}

#[derive(Deserialize)]
struct AccountsResponse {
    data: Vec<Account>,
}

#[derive(Deserialize)]
struct VpcsResponse {
    data: VpcsData,
}

#[derive(Deserialize)]
struct VpcsData {
    vpcs: Vec<Vpc>,
}

/// Read-only access to the account and network inventory. Both calls return
/// a full snapshot.
#[async_trait]
pub trait Inventory {
    async fn fetch_accounts(&self) -> Result<Vec<Account>, Error>;

    async fn fetch_vpcs(&self) -> Result<Vec<Vpc>, Error>;
}

/// Prism-backed [`Inventory`].
pub struct PrismClient {
    base_url: String,

    client: Client,
}

impl PrismClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(client) => client,
            Err(err) => {
                return Err(Error::Unavailable {
                    url: base_url,
                    reason: format!("failed to create HTTP client: {}", err),
                })
            }
        };

        return Ok(Self { base_url, client });
    }

    async fn get(&self, path: &str) -> Result<(String, String), Error> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "querying inventory");

        let unavailable = |reason: String| Error::Unavailable {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|err| unavailable(err.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|err| unavailable(format!("unable to read response body: {}", err)))?;

        return Ok((url, body));
    }
}

#[async_trait]
impl Inventory for PrismClient {
    async fn fetch_accounts(&self) -> Result<Vec<Account>, Error> {
        let (url, body) = self.get("/sources/accounts").await?;
        let accounts = parse_accounts(&url, &body)?;
        tracing::info!(count = accounts.len(), "fetched accounts");

        return Ok(accounts);
    }

    async fn fetch_vpcs(&self) -> Result<Vec<Vpc>, Error> {
        let (url, body) = self.get("/vpcs").await?;
        let vpcs = parse_vpcs(&url, &body)?;
        tracing::info!(count = vpcs.len(), "fetched vpcs");

        return Ok(vpcs);
    }
}

pub fn parse_accounts(url: &str, body: &str) -> Result<Vec<Account>, Error> {
    match serde_json::from_str::<AccountsResponse>(body) {
        Ok(response) => Ok(response.data),
        Err(err) => Err(Error::Malformed {
            url: url.to_string(),
            reason: err.to_string(),
        }),
    }
}

pub fn parse_vpcs(url: &str, body: &str) -> Result<Vec<Vpc>, Error> {
    match serde_json::from_str::<VpcsResponse>(body) {
        Ok(response) => Ok(response.data.vpcs),
        Err(err) => Err(Error::Malformed {
            url: url.to_string(),
            reason: err.to_string(),
        }),
    }
}

/// Canned inventory for exercising the pipeline without a network.
#[cfg(test)]
pub struct FixedInventory {
    pub accounts: Result<Vec<Account>, Error>,
    pub vpcs: Result<Vec<Vpc>, Error>,
}

#[cfg(test)]
impl FixedInventory {
    pub fn new(accounts: Vec<Account>, vpcs: Vec<Vpc>) -> Self {
        return Self {
            accounts: Ok(accounts),
            vpcs: Ok(vpcs),
        };
    }
}

#[cfg(test)]
#[async_trait]
impl Inventory for FixedInventory {
    async fn fetch_accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts.clone()
    }

    async fn fetch_vpcs(&self) -> Result<Vec<Vpc>, Error> {
        self.vpcs.clone()
    }
}

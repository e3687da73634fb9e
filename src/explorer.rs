//! Etherscan-compatible contract verification client.
//!
//! Submits standard-JSON verification requests to the block explorer configured
//! for the network and checks their status. One request per call, no polling
//! loop and no retries.

use alloy::primitives::{Address, Bytes};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

use crate::network::ExplorerConfig;

/// Compiler settings the contracts are built with.
pub const COMPILER_VERSION: &str = "v0.8.26+commit.8a97fa7a";
pub const OPTIMIZER_RUNS: u32 = 200;

/// One source verification submission.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub address: Address,
    /// Fully qualified name, `contracts/<Name>.sol:<Name>`.
    pub contract_name: String,
    /// Solc standard JSON input used for the build.
    pub standard_json: String,
    pub constructor_args: Bytes,
    pub compiler_version: String,
}

impl VerificationRequest {
    /// Form fields of the `verifysourcecode` action.
    pub fn form_fields(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", api_key.to_string()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", format!("{:#x}", self.address)),
            ("sourceCode", self.standard_json.clone()),
            ("codeformat", "solidity-standard-json-input".to_string()),
            ("contractname", self.contract_name.clone()),
            ("compilerversion", self.compiler_version.clone()),
            ("optimizationUsed", "1".to_string()),
            ("runs", OPTIMIZER_RUNS.to_string()),
            // The misspelling is part of the Etherscan API.
            (
                "constructorArguements",
                alloy::hex::encode(&self.constructor_args),
            ),
        ]
    }
}

/// Status of a submitted verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    Pending,
    AlreadyVerified,
    Failed(String),
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    message: String,
    result: String,
}

/// HTTP client for the explorer verification API.
pub struct ExplorerClient {
    http: reqwest::Client,
    api_url: Url,
    browser_url: Url,
    api_key: String,
}

impl ExplorerClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("explorer API key is not configured")?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            browser_url: config.browser_url.clone(),
            api_key,
        })
    }

    /// Link to the contract page on the explorer.
    pub fn contract_url(&self, address: Address) -> String {
        format!(
            "{}/address/{:#x}",
            self.browser_url.as_str().trim_end_matches('/'),
            address
        )
    }

    /// Submits a verification request, returning the explorer's job id.
    pub async fn submit(&self, request: &VerificationRequest) -> Result<String> {
        tracing::info!(
            target: "tokenops::explorer",
            address = %request.address,
            contract = %request.contract_name,
            compiler = %request.compiler_version,
            "Submitting contract verification"
        );

        let response: ExplorerResponse = self
            .http
            .post(self.api_url.clone())
            .form(&request.form_fields(&self.api_key))
            .send()
            .await
            .context("failed to reach explorer")?
            .error_for_status()
            .context("explorer rejected verification request")?
            .json()
            .await
            .context("failed to parse explorer response")?;

        parse_submission(response)
    }

    /// Checks the status of a previously submitted verification.
    pub async fn status(&self, guid: &str) -> Result<VerificationStatus> {
        let response: ExplorerResponse = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await
            .context("failed to reach explorer")?
            .error_for_status()
            .context("explorer rejected status request")?
            .json()
            .await
            .context("failed to parse explorer response")?;

        Ok(parse_status(&response))
    }
}

fn parse_submission(response: ExplorerResponse) -> Result<String> {
    if response.status == "1" {
        return Ok(response.result);
    }
    if response.result.to_ascii_lowercase().contains("already verified") {
        bail!("contract is already verified");
    }
    bail!(
        "verification submission failed: {} ({})",
        response.result,
        response.message
    )
}

fn parse_status(response: &ExplorerResponse) -> VerificationStatus {
    let result = response.result.to_ascii_lowercase();
    if result.contains("already verified") {
        VerificationStatus::AlreadyVerified
    } else if result.contains("pending") || result.contains("queue") {
        VerificationStatus::Pending
    } else if response.status == "1" || result.starts_with("pass") {
        VerificationStatus::Verified
    } else {
        VerificationStatus::Failed(response.result.clone())
    }
}

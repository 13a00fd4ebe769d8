use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::AppConfig;

const CLIENT_NAME: &str = "Personal Finance App";
const DAYS_REQUESTED: u32 = 730;

// Placeholder end-user; link tokens are not tied to real accounts yet.
const SAMPLE_CLIENT_USER_ID: &str = "user-id";
const SAMPLE_PHONE_NUMBER: &str = "+1 415 5550123";

#[derive(Debug, Serialize)]
pub struct LinkTokenUser {
    pub client_user_id: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionsOptions {
    pub days_requested: u32,
}

#[derive(Debug, Serialize)]
pub struct AccountSubtypes {
    pub account_subtypes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountFilters {
    pub depository: AccountSubtypes,
    pub credit: AccountSubtypes,
}

/// Body of `POST /link/token/create`.
#[derive(Debug, Serialize)]
pub struct LinkTokenCreateRequest {
    pub user: LinkTokenUser,
    pub client_name: String,
    pub client_id: String,
    pub secret: String,
    pub products: Vec<String>,
    pub transactions: TransactionsOptions,
    pub country_codes: Vec<String>,
    pub language: String,
    pub redirect_uri: String,
    pub account_filters: AccountFilters,
}

#[derive(Debug, Deserialize)]
struct LinkTokenCreateResponse {
    link_token: String,
}

#[async_trait]
pub trait LinkTokenService: Send + Sync {
    async fn create_link_token(&self) -> Result<String>;
}

pub struct PlaidClient {
    http: Client,
    base_url: String,
    client_id: String,
    secret: String,
    redirect_uri: String,
}

impl PlaidClient {
    pub fn new(app_config: &AppConfig) -> Self {
        PlaidClient {
            http: Client::new(),
            base_url: app_config.plaid_base_url.trim_end_matches('/').to_string(),
            client_id: app_config.plaid_client_id.clone(),
            secret: app_config.plaid_secret.clone(),
            redirect_uri: format!("{}/expenses/link-bank", app_config.app_url),
        }
    }

    pub fn link_token_request(&self) -> LinkTokenCreateRequest {
        LinkTokenCreateRequest {
            user: LinkTokenUser {
                client_user_id: SAMPLE_CLIENT_USER_ID.to_string(),
                phone_number: SAMPLE_PHONE_NUMBER.to_string(),
            },
            client_name: CLIENT_NAME.to_string(),
            client_id: self.client_id.clone(),
            secret: self.secret.clone(),
            products: owned(&["transactions"]),
            transactions: TransactionsOptions {
                days_requested: DAYS_REQUESTED,
            },
            country_codes: owned(&["US"]),
            language: "en".to_string(),
            redirect_uri: self.redirect_uri.clone(),
            account_filters: AccountFilters {
                depository: AccountSubtypes {
                    account_subtypes: owned(&["checking", "savings"]),
                },
                credit: AccountSubtypes {
                    account_subtypes: owned(&["credit card"]),
                },
            },
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[async_trait]
impl LinkTokenService for PlaidClient {
    async fn create_link_token(&self) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/link/token/create", self.base_url))
            .json(&self.link_token_request())
            .send()
            .await
            .map_err(|e| {
                error!("HTTP request error: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            error!("Error response from Plaid ({}): {}", status, error_body);
            return Err(anyhow!("Plaid rejected link token request with {}", status));
        }

        let body = response.json::<LinkTokenCreateResponse>().await?;
        info!("Created Plaid link token");
        Ok(body.link_token)
    }
}

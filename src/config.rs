use anyhow::anyhow;
use shuttle_runtime::SecretStore;

const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PLAID_BASE_URL: &str = "https://sandbox.plaid.com";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_api_base: Option<String>,
    pub chat_model: String,
    pub plaid_client_id: String,
    pub plaid_secret: String,
    pub plaid_base_url: String,
    pub app_url: String,
}

impl AppConfig {
    pub fn new(secret_store: &SecretStore) -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| secret_store.get(key))
    }

    /// Builds the config from any key lookup, e.g. the shuttle secret store.
    pub fn from_lookup<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL")
            .ok_or_else(|| anyhow!("DATABASE_URL not found"))?;

        let openai_api_key = get("OPENAI_API_KEY")
            .ok_or_else(|| anyhow!("OPENAI_API_KEY not found"))?;

        let plaid_client_id = get("PLAID_CLIENT_ID")
            .ok_or_else(|| anyhow!("PLAID_CLIENT_ID not found"))?;

        let plaid_secret = get("PLAID_SECRET")
            .ok_or_else(|| anyhow!("PLAID_SECRET not found"))?;

        // Optional keys fall back to sandbox/local defaults
        let openai_api_base = get("OPENAI_API_BASE");

        let chat_model = get("CHAT_MODEL")
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

        let plaid_base_url = get("PLAID_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PLAID_BASE_URL.to_string());

        let app_url = get("APP_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_APP_URL.to_string());

        Ok(AppConfig {
            database_url,
            openai_api_key,
            openai_api_base,
            chat_model,
            plaid_client_id,
            plaid_secret,
            plaid_base_url,
            app_url,
        })
    }
}

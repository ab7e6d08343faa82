use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::{ConfigStore, CredentialStore};

/// Configuration key holding the API base URI.
pub const API_BASE_URI_KEY: &str = "apiBaseUri";

/// Thin JSON client for the accounting service.
pub struct ApiClient {
    http: reqwest::Client,
    base_uri: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_uri: String, token: String) -> ApiClient {
        ApiClient {
            http: reqwest::Client::new(),
            base_uri,
            token,
        }
    }

    /// Build a client from the persisted base URI and the auth token stored
    /// for its host.
    pub fn from_stores(config: &ConfigStore, credentials: &CredentialStore) -> Result<ApiClient> {
        let base_uri = config
            .require_str(API_BASE_URI_KEY)?
            .trim_end_matches('/')
            .to_string();
        let host = host_of(&base_uri)?;
        let token = credentials.require_token(&host)?.to_string();
        Ok(ApiClient::new(base_uri, token))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .get(format!("{}{}", self.base_uri, path))
            .query(query)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base_uri, path))
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Host component of the base URI (with the port when one is given); auth
/// tokens are scoped by it.
pub fn host_of(base_uri: &str) -> Result<String> {
    let url =
        Url::parse(base_uri).map_err(|_| Error::InvalidBaseUri(base_uri.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidBaseUri(base_uri.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

//! DigitalOcean REST API v2 client
//!
//! Thin typed wrapper over the droplet and account-key endpoints.
//! Uses Bearer token authentication.

use crate::error::{DigitalOceanError, Result};
use serde::{Deserialize, Serialize};

const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// DigitalOcean droplets API client
pub struct DropletsApi {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

/// Configuration for the DigitalOcean client
#[derive(Debug, Clone)]
pub struct DigitalOceanConfig {
    pub token: String,
}

impl DigitalOceanConfig {
    /// Read the API token from the `DIGITALOCEAN_TOKEN` environment variable
    pub fn from_env() -> Result<Self> {
        let token =
            std::env::var("DIGITALOCEAN_TOKEN").map_err(|_| DigitalOceanError::MissingToken)?;
        Ok(Self { token })
    }
}

impl DropletsApi {
    /// Create a new API client
    pub fn new(config: DigitalOceanConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: config.token,
            base_url: DIGITALOCEAN_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (stub servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a droplet
    pub async fn create_droplet(&self, request: &CreateDropletRequest) -> Result<Droplet> {
        let url = format!("{}/droplets", self.base_url);
        tracing::debug!(name = %request.name, region = %request.region, "creating droplet");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: DropletResponse = response.json().await?;
        Ok(body.droplet)
    }

    /// Read the current droplet descriptor
    pub async fn get_droplet(&self, id: u64) -> Result<Droplet> {
        let url = format!("{}/droplets/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DigitalOceanError::DropletNotFound(id));
        }

        let response = Self::check_status(response).await?;
        let body: DropletResponse = response.json().await?;
        Ok(body.droplet)
    }

    /// Delete a droplet. The API acknowledges with 204 No Content.
    pub async fn delete_droplet(&self, id: u64) -> Result<()> {
        let url = format!("{}/droplets/{}", self.base_url, id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DigitalOceanError::DropletNotFound(id));
        }

        Self::check_status(response).await?;
        Ok(())
    }

    /// List all SSH keys registered with the account
    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let url = format!("{}/account/keys", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: SshKeysResponse = response.json().await?;
        Ok(body.ssh_keys)
    }

    /// Resolve a key name to the account's key record
    pub async fn find_ssh_key(&self, name: &str) -> Result<Option<SshKey>> {
        let keys = self.list_ssh_keys().await?;
        Ok(keys.into_iter().find(|k| k.name == name))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(DigitalOceanError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

// ============ API Types ============

/// Request body for `POST /v2/droplets`
#[derive(Debug, Clone, Serialize)]
pub struct CreateDropletRequest {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    /// Account key ids (not names) to install on first boot
    pub ssh_keys: Vec<u64>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DropletResponse {
    droplet: Droplet,
}

/// Droplet as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    /// Vendor status string: "new", "active", "off", "archive"
    pub status: String,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub networks: Networks,
}

impl Droplet {
    /// First public IPv4 address, if one has been assigned yet
    pub fn public_ipv4(&self) -> Option<&str> {
        self.networks
            .v4
            .iter()
            .find(|n| n.kind == "public")
            .map(|n| n.ip_address.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub slug: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub v4: Vec<NetworkV4>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkV4 {
    pub ip_address: String,
    /// "public" or "private"
    #[serde(rename = "type")]
    pub kind: String,
}

/// SSH key record from `GET /v2/account/keys`
#[derive(Debug, Clone, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SshKeysResponse {
    ssh_keys: Vec<SshKey>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    #[serde(default)]
    id: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_droplet_without_network() {
        let body = r#"{
            "droplet": {
                "id": 555,
                "name": "test-1",
                "status": "new",
                "region": {"slug": "nyc1", "name": "New York 1"},
                "image": {"slug": "ubuntu-19-10-x64", "name": "19.10 x64"},
                "networks": {"v4": []}
            }
        }"#;

        let response: DropletResponse = serde_json::from_str(body).unwrap();
        let droplet = response.droplet;
        assert_eq!(droplet.id, 555);
        assert_eq!(droplet.name, "test-1");
        assert_eq!(droplet.status, "new");
        assert_eq!(droplet.region.as_ref().unwrap().slug, "nyc1");
        assert_eq!(droplet.public_ipv4(), None);
    }

    #[test]
    fn test_public_ipv4_skips_private_addresses() {
        let body = r#"{
            "id": 555,
            "name": "test-1",
            "status": "active",
            "networks": {
                "v4": [
                    {"ip_address": "10.132.0.2", "type": "private"},
                    {"ip_address": "203.0.113.5", "type": "public"}
                ]
            }
        }"#;

        let droplet: Droplet = serde_json::from_str(body).unwrap();
        assert_eq!(droplet.public_ipv4(), Some("203.0.113.5"));
    }

    #[test]
    fn test_parse_droplet_with_missing_networks() {
        // The create response can omit networks entirely.
        let droplet: Droplet =
            serde_json::from_str(r#"{"id": 1, "name": "a", "status": "new"}"#).unwrap();
        assert!(droplet.networks.v4.is_empty());
    }

    #[test]
    fn test_create_request_wire_format() {
        let request = CreateDropletRequest {
            name: "test-1".to_string(),
            region: "nyc1".to_string(),
            size: "s-1vcpu-1gb".to_string(),
            image: "ubuntu-19-10-x64".to_string(),
            ssh_keys: vec![12345],
            tags: vec!["spinup".to_string()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["name"], "test-1");
        assert_eq!(value["region"], "nyc1");
        assert_eq!(value["size"], "s-1vcpu-1gb");
        assert_eq!(value["image"], "ubuntu-19-10-x64");
        assert_eq!(value["ssh_keys"], serde_json::json!([12345]));
        assert_eq!(value["tags"], serde_json::json!(["spinup"]));
    }

    #[test]
    fn test_parse_ssh_key_list() {
        let body = r#"{
            "ssh_keys": [
                {"id": 12345, "name": "csc519", "fingerprint": "aa:bb"},
                {"id": 67890, "name": "laptop"}
            ],
            "meta": {"total": 2}
        }"#;

        let response: SshKeysResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.ssh_keys.len(), 2);
        assert_eq!(response.ssh_keys[0].id, 12345);
        assert_eq!(response.ssh_keys[0].name, "csc519");
        assert_eq!(response.ssh_keys[1].fingerprint, None);
    }

    #[test]
    fn test_parse_api_error_body() {
        let body = r#"{"id": "unauthorized", "message": "Unable to authenticate you."}"#;
        let error: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(error.message, "Unable to authenticate you.");
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_var("DIGITALOCEAN_TOKEN", Some("dop_v1_test"), || {
            let config = DigitalOceanConfig::from_env().unwrap();
            assert_eq!(config.token, "dop_v1_test");
        });

        temp_env::with_var_unset("DIGITALOCEAN_TOKEN", || {
            let err = DigitalOceanConfig::from_env().unwrap_err();
            assert!(matches!(err, DigitalOceanError::MissingToken));
        });
    }
}

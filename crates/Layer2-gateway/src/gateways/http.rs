//! HTTP gateway for the Plugin Service REST API

use crate::{
    error::GatewayError,
    r#trait::ResourceGateway,
    resource::{
        ConfigurationResource, ConfiguredPluginResource, Page, PluginResource,
        PluginVersionResource, ReleaseResource,
    },
    retry::{with_retry, RetryConfig},
};
use async_trait::async_trait;
use plugscope_foundation::{Error, Result, ServiceConfig};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("plugscope/", env!("CARGO_PKG_VERSION"));

/// Plugin Service gateway over HTTPS with basic auth
pub struct HttpGateway {
    client: Client,
    base_url: String,
    base: Url,
    username: String,
    password: String,
    retry_config: RetryConfig,
}

impl HttpGateway {
    /// Create a gateway from a validated service config
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.effective_timeout()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.effective_base_url().to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            base,
            username: config.username.clone().unwrap_or_default(),
            password: config.password.clone().unwrap_or_default(),
            retry_config: RetryConfig::new(config.effective_max_retries()),
        })
    }

    /// Set retry configuration
    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Resolve the URL for a page: first page from `path`, later pages from the
    /// token handed out by the previous page.
    fn page_url(&self, path: &str, page_token: Option<&str>) -> std::result::Result<String, GatewayError> {
        match page_token {
            None => Ok(self.url(path)),
            Some(token) if self.is_service_url(token) => Ok(token.to_string()),
            Some(token) => Err(GatewayError::InvalidResponse(format!(
                "page token does not belong to {}: {}",
                self.base_url, token
            ))),
        }
    }

    /// Same scheme, host and port as the base URL, with a path at or below
    /// the base path
    fn is_service_url(&self, candidate: &str) -> bool {
        let Ok(url) = Url::parse(candidate) else {
            return false;
        };
        if url.scheme() != self.base.scheme()
            || url.host_str() != self.base.host_str()
            || url.port_or_known_default() != self.base.port_or_known_default()
        {
            return false;
        }

        let base_path = self.base.path().trim_end_matches('/');
        let path = url.path();
        base_path.is_empty()
            || path == base_path
            || path
                .strip_prefix(base_path)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    async fn get_json<T>(&self, url: &str) -> std::result::Result<T, GatewayError>
    where
        T: DeserializeOwned + Send,
    {
        let request = format!("GET {}", url);
        with_retry(&self.retry_config, &request, || self.send_get(url)).await
    }

    async fn send_get<T>(&self, url: &str) -> std::result::Result<T, GatewayError>
    where
        T: DeserializeOwned + Send,
    {
        debug!("Making a GET to {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(GatewayError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("GET {} errored with statusCode {}", url, status.as_u16());
            return Err(GatewayError::from_http_status(status.as_u16(), &body));
        }

        debug!("GET {} responded with statusCode {}", url, status.as_u16());
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn get_page<T>(
        &self,
        path: &str,
        key: &str,
        page_token: Option<&str>,
    ) -> std::result::Result<Page<T>, GatewayError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.page_url(path, page_token)?;
        let body: Value = self.get_json(&url).await?;
        parse_page(body, key)
    }
}

/// Split a list response into items (under `key`) and the next page link
/// (`meta.next_page_url`).
fn parse_page<T: DeserializeOwned>(
    mut body: Value,
    key: &str,
) -> std::result::Result<Page<T>, GatewayError> {
    let items = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| GatewayError::InvalidResponse(format!("list response has no `{}`", key)))?;
    let items: Vec<T> = serde_json::from_value(items)
        .map_err(|e| GatewayError::InvalidResponse(format!("malformed `{}`: {}", key, e)))?;

    let next_page_token = body
        .get("meta")
        .and_then(|meta| meta.get("next_page_url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(String::from);

    Ok(Page::new(items, next_page_token))
}

#[async_trait]
impl ResourceGateway for HttpGateway {
    async fn get_configuration(
        &self,
        sid: &str,
    ) -> std::result::Result<ConfigurationResource, GatewayError> {
        self.get_json(&self.url(&format!("Configurations/{}", sid)))
            .await
    }

    async fn list_configured_plugins(
        &self,
        configuration_sid: &str,
        page_token: Option<&str>,
    ) -> std::result::Result<Page<ConfiguredPluginResource>, GatewayError> {
        let path = format!("Configurations/{}/Plugins", configuration_sid);
        self.get_page(&path, "plugins", page_token).await
    }

    async fn get_plugin(&self, plugin_sid: &str) -> std::result::Result<PluginResource, GatewayError> {
        self.get_json(&self.url(&format!("Plugins/{}", plugin_sid)))
            .await
    }

    async fn get_plugin_version(
        &self,
        plugin_sid: &str,
        version_sid: &str,
    ) -> std::result::Result<PluginVersionResource, GatewayError> {
        let path = format!("Plugins/{}/Versions/{}", plugin_sid, version_sid);
        self.get_json(&self.url(&path)).await
    }

    async fn get_active_release(
        &self,
    ) -> std::result::Result<Option<ReleaseResource>, GatewayError> {
        match self.get_json(&self.url("Releases/Active")).await {
            Ok(release) => Ok(Some(release)),
            Err(GatewayError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_configurations(
        &self,
        page_token: Option<&str>,
    ) -> std::result::Result<Page<ConfigurationResource>, GatewayError> {
        self.get_page("Configurations", "configurations", page_token).await
    }

    async fn list_plugins(
        &self,
        page_token: Option<&str>,
    ) -> std::result::Result<Page<PluginResource>, GatewayError> {
        self.get_page("Plugins", "plugins", page_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway() -> HttpGateway {
        let config = ServiceConfig::new()
            .base_url("https://flex-api.example.com/v1/PluginService/")
            .credentials("AC123", "token");
        HttpGateway::new(&config).unwrap()
    }

    #[test]
    fn test_requires_credentials() {
        let result = HttpGateway::new(&ServiceConfig::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_building() {
        let gw = gateway();
        assert_eq!(
            gw.url("Configurations/FJ1"),
            "https://flex-api.example.com/v1/PluginService/Configurations/FJ1"
        );
        assert_eq!(
            gw.page_url("Plugins", None).unwrap(),
            "https://flex-api.example.com/v1/PluginService/Plugins"
        );
    }

    #[test]
    fn test_page_token_must_stay_on_service() {
        let gw = gateway();
        let next = "https://flex-api.example.com/v1/PluginService/Plugins?PageSize=50&Page=1&PageToken=PT1";
        assert_eq!(gw.page_url("Plugins", Some(next)).unwrap(), next);

        let foreign = gw.page_url("Plugins", Some("https://attacker.example.net/Plugins"));
        assert!(matches!(foreign, Err(GatewayError::InvalidResponse(_))));
    }

    #[test]
    fn test_page_token_host_must_match_exactly() {
        let config = ServiceConfig::new()
            .base_url("http://localhost:8080")
            .credentials("AC123", "token");
        let gw = HttpGateway::new(&config).unwrap();

        let next = "http://localhost:8080/Plugins?Page=1";
        assert_eq!(gw.page_url("Plugins", Some(next)).unwrap(), next);

        for token in [
            "http://localhost:8080.attacker.net/steal",
            "http://localhost:8081/Plugins?Page=1",
            "https://localhost:8080/Plugins?Page=1",
            "not a url",
        ] {
            assert!(
                matches!(gw.page_url("Plugins", Some(token)), Err(GatewayError::InvalidResponse(_))),
                "accepted {}",
                token
            );
        }
    }

    #[test]
    fn test_page_token_path_must_stay_under_base_path() {
        let gw = gateway();

        let sibling = "https://flex-api.example.com/v1/PluginServiceEvil/Plugins?Page=1";
        assert!(gw.page_url("Plugins", Some(sibling)).is_err());

        let outside = "https://flex-api.example.com/v2/Plugins?Page=1";
        assert!(gw.page_url("Plugins", Some(outside)).is_err());

        let default_port = "https://flex-api.example.com:443/v1/PluginService/Plugins?Page=1";
        assert!(gw.page_url("Plugins", Some(default_port)).is_ok());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = ServiceConfig::new()
            .base_url("not a url")
            .credentials("AC123", "token");
        assert!(matches!(HttpGateway::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_page_with_next() {
        let body = json!({
            "plugins": [
                {"sid": "FP1", "unique_name": "plugin-one"},
                {"sid": "FP2", "unique_name": "plugin-two"}
            ],
            "meta": {
                "page": 0,
                "page_size": 2,
                "next_page_url": "https://flex-api.example.com/v1/PluginService/Plugins?Page=1",
                "key": "plugins"
            }
        });

        let page: Page<PluginResource> = parse_page(body, "plugins").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].unique_name, "plugin-two");
        assert_eq!(
            page.next_page_token.as_deref(),
            Some("https://flex-api.example.com/v1/PluginService/Plugins?Page=1")
        );
    }

    #[test]
    fn test_parse_last_page() {
        let body = json!({
            "plugins": [],
            "meta": {"page": 3, "next_page_url": null, "key": "plugins"}
        });
        let page: Page<PluginResource> = parse_page(body, "plugins").unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn test_parse_configurations_page() {
        let body = json!({
            "configurations": [
                {"sid": "FJ1", "version": "1.0.0", "description": "first", "date_created": "2020-09-01T00:00:00Z"},
                {"sid": "FJ2", "version": "2.0.0", "description": null, "date_created": "2020-09-02T00:00:00Z"}
            ],
            "meta": {"page": 0, "next_page_url": null, "key": "configurations"}
        });

        let page: Page<ConfigurationResource> = parse_page(body, "configurations").unwrap();
        assert_eq!(page.items[0].description.as_deref(), Some("first"));
        assert_eq!(page.items[1].description, None);
        assert!(page.is_last());
    }

    #[test]
    fn test_parse_page_missing_key() {
        let body = json!({"configurations": [], "meta": {}});
        let result: std::result::Result<Page<PluginResource>, _> = parse_page(body, "plugins");
        assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
    }
}

//! Client configuration
//!
//! Where mutation requests are sent and which tenant they act for. Read from
//! the `[client]` table of a TOML file:
//!
//! ```toml
//! [client]
//! api_base_url = "https://erp.example.com"
//! tenant_code = "acme"
//! ```

use std::path::Path;

use nestwrite_core::Result;
use serde::{Deserialize, Deserializer, Serialize};
use url::{Position, Url};

use crate::error::{SchemaError, SchemaResult};

/// Header carrying the tenant code by default.
pub const DEFAULT_TENANT_HEADER: &str = "x-tenant-code";

// Stand-in origin for root-relative URLs; only its path is kept.
const RELATIVE_ORIGIN: &str = "http://localhost/";

/// API location and tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL joined with schema endpoints; unset yields root-relative URLs
    #[serde(deserialize_with = "deserialize_base_url")]
    pub api_base_url: Option<Url>,
    /// Tenant code sent with every request
    pub tenant_code: Option<String>,
    /// Header name for the tenant code
    pub tenant_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            tenant_code: None,
            tenant_header: DEFAULT_TENANT_HEADER.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ClientFile {
    #[serde(default)]
    client: ClientConfig,
}

fn parse_base_url(raw: &str) -> SchemaResult<Url> {
    let invalid = |reason: String| SchemaError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot carry a path".to_string()));
    }
    Ok(url)
}

fn deserialize_base_url<'de, D>(deserializer: D) -> std::result::Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_base_url(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl ClientConfig {
    /// Create a config for a base URL.
    ///
    /// Fails if `api_base_url` is not an absolute URL with a path.
    pub fn new(api_base_url: &str) -> SchemaResult<Self> {
        Ok(Self {
            api_base_url: Some(parse_base_url(api_base_url)?),
            ..Self::default()
        })
    }

    /// Set the tenant code.
    pub fn tenant(mut self, code: impl Into<String>) -> Self {
        self.tenant_code = Some(code.into());
        self
    }

    /// Parse the `[client]` table of a TOML document.
    ///
    /// An invalid `api_base_url` is reported as a config error.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ClientFile = toml::from_str(s)?;
        Ok(file.client)
    }

    /// Read the config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// URL of an endpoint, or of one row under it when `id` is given.
    ///
    /// Endpoint segments and the id are percent-encoded, so an id holding
    /// `/`, `?` or `#` stays a single path segment.
    pub fn url_for(&self, endpoint: &str, id: Option<&str>) -> SchemaResult<String> {
        let mut url = match &self.api_base_url {
            Some(base) => base.clone(),
            None => parse_base_url(RELATIVE_ORIGIN)?,
        };
        {
            let mut segments = url.path_segments_mut().map_err(|()| SchemaError::InvalidBaseUrl {
                url: self
                    .api_base_url
                    .as_ref()
                    .map_or(RELATIVE_ORIGIN, Url::as_str)
                    .to_string(),
                reason: "cannot carry a path".to_string(),
            })?;
            segments
                .pop_if_empty()
                .extend(endpoint.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(match self.api_base_url {
            Some(_) => url.into(),
            None => url[Position::BeforePath..].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ClientConfig::default();
        assert_eq!(c.tenant_header, "x-tenant-code");
        assert!(c.tenant_code.is_none());
        assert_eq!(c.url_for("api/hr/x", None).unwrap(), "/api/hr/x");
    }

    #[test]
    fn test_url_for_trims_slashes() {
        let c = ClientConfig::new("https://erp.example.com/").unwrap();
        assert_eq!(
            c.url_for("/api/hr/salaryStructureRules/", None).unwrap(),
            "https://erp.example.com/api/hr/salaryStructureRules"
        );
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let c = ClientConfig::new("https://erp.example.com/erp/").unwrap();
        assert_eq!(
            c.url_for("api/hr/rules", Some("r1")).unwrap(),
            "https://erp.example.com/erp/api/hr/rules/r1"
        );
    }

    #[test]
    fn test_url_for_encodes_id() {
        let c = ClientConfig::new("https://erp.example.com").unwrap();
        assert_eq!(
            c.url_for("api/hr/rules", Some("a/b?x=1#f")).unwrap(),
            "https://erp.example.com/api/hr/rules/a%2Fb%3Fx=1%23f"
        );
        assert_eq!(
            ClientConfig::default()
                .url_for("api/hr/rules", Some("a/b?x=1#f"))
                .unwrap(),
            "/api/hr/rules/a%2Fb%3Fx=1%23f"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base() {
        assert!(matches!(
            ClientConfig::new("erp.example.com"),
            Err(SchemaError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("mailto:ops@example.com"),
            Err(SchemaError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_from_toml() {
        let c = ClientConfig::from_toml_str(
            r#"
            [conventions]
            id_key = "id"

            [client]
            api_base_url = "https://erp.example.com"
            tenant_code = "acme"
            "#,
        )
        .unwrap();
        assert_eq!(
            c,
            ClientConfig::new("https://erp.example.com").unwrap().tenant("acme")
        );
    }

    #[test]
    fn test_from_toml_empty_base_is_relative() {
        let c = ClientConfig::from_toml_str("[client]\napi_base_url = \"\"\n").unwrap();
        assert!(c.api_base_url.is_none());
    }

    #[test]
    fn test_from_toml_invalid_base() {
        let err = ClientConfig::from_toml_str("[client]\napi_base_url = \"not a url\"\n")
            .unwrap_err();
        assert!(matches!(err, nestwrite_core::Error::Config(_)));
        assert!(err.to_string().contains("invalid API base URL 'not a url'"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nestwrite.toml");
        std::fs::write(&path, "[client]\ntenant_header = \"x-org\"\n").unwrap();
        let c = ClientConfig::load(&path).unwrap();
        assert_eq!(c.tenant_header, "x-org");
        assert!(c.api_base_url.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, nestwrite_core::Error::Io(_)));
    }
}

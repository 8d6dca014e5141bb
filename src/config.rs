//! Server configuration
use derive_builder::Builder;
use garde::Validate;
use url::Url;

use crate::datamodel::errors::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

const MIN_BODY_BYTES: usize = 1024;
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Builder, Validate)]
#[builder(default)]
pub struct ServerConfig {
    /// Interface to bind to
    #[builder(setter(into))]
    #[garde(length(min = 1))]
    pub host: String,
    #[garde(range(min = 1))]
    pub port: u16,
    /// Upper bound for an uploaded file or request body
    #[garde(range(min = MIN_BODY_BYTES, max = MAX_BODY_BYTES))]
    pub max_body_bytes: usize,
    /// Externally visible address, advertised in the API description
    #[garde(skip)]
    pub public_url: Option<Url>,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Build from the builder and check the bounds.
    pub fn from_builder(builder: &ServerConfigBuilder) -> Result<Self> {
        let config = builder
            .build()
            .map_err(|e| Error::Builder(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => format!("http://{}", self.addr()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            public_url: None,
        }
    }
}

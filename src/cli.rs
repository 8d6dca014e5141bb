use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

use fairness_evaluator::config::{
    DEFAULT_HOST, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT, ServerConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "fairness-evaluator",
    version,
    about = "Validate Smart Data Model documents (GeoJSON location and NGSI-LD @context)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Validate a single JSON file
    Validate {
        file: PathBuf,
        #[arg(long, help = "Print the verdict as JSON")]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "FAIR_HOST", default_value = DEFAULT_HOST)]
    pub host: String,
    #[arg(long, env = "FAIR_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    #[arg(long, env = "FAIR_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
    #[arg(long, env = "FAIR_PUBLIC_URL", help = "Externally visible base URL")]
    pub public_url: Option<Url>,
}

impl ServeArgs {
    pub fn to_config(&self) -> fairness_evaluator::datamodel::Result<ServerConfig> {
        ServerConfig::from_builder(
            ServerConfig::builder()
                .host(self.host.clone())
                .port(self.port)
                .max_body_bytes(self.max_body_bytes)
                .public_url(self.public_url.clone()),
        )
    }
}
